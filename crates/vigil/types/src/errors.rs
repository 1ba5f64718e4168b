//! Record validation errors
//!
//! Pure pipeline functions are total and never fail; `validate()` checks
//! gate `put` calls on stores, not the pipeline itself.

use thiserror::Error;

/// Errors from record-level `validate()` checks.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("missing id on {0} record")]
    MissingId(&'static str),

    #[error("missing required field {field} on {record} record")]
    MissingField {
        record: &'static str,
        field: &'static str,
    },

    #[error("field {field} out of range: {value}")]
    OutOfRange { field: &'static str, value: String },
}

/// Result alias for validation checks.
pub type ValidationResult = Result<(), ValidationError>;
