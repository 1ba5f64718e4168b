//! Obligations: the pipeline's external input
//!
//! Obligation extraction is an external collaborator; the core treats an
//! obligation as immutable once produced.

use crate::{ObligationKind, Severity, SourceType, ValidationError, ValidationResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A pending real-world item requiring eventual attention.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Obligation {
    /// Identifier assigned by the extractor
    pub id: String,
    /// Attention domain this belongs to
    pub circle: String,
    /// What the item asks of the user
    pub kind: ObligationKind,
    /// Where it came from
    pub source: SourceType,
    /// Stable reference into the source system (message id, order id, ...)
    pub source_ref: String,
    /// One-line human summary
    pub summary: String,
    /// When the item is due, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_at: Option<DateTime<Utc>>,
    /// Extractor-reported severity
    pub severity: Severity,
    /// Extractor-estimated regret of missing this, 0.0..=1.0
    pub regret: f64,
    /// Extractor confidence in the obligation, 0.0..=1.0
    pub confidence: f64,
    /// Intersection (shared-household) context, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intersection_id: Option<String>,
    /// Person the item concerns, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_ref: Option<String>,
    /// Vendor the item concerns, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_ref: Option<String>,
}

impl Obligation {
    pub fn new(
        id: impl Into<String>,
        circle: impl Into<String>,
        kind: ObligationKind,
        source: SourceType,
        source_ref: impl Into<String>,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            circle: circle.into(),
            kind,
            source,
            source_ref: source_ref.into(),
            summary: summary.into(),
            due_at: None,
            severity: Severity::Medium,
            regret: 0.0,
            confidence: 1.0,
            intersection_id: None,
            person_ref: None,
            vendor_ref: None,
        }
    }

    pub fn with_due(mut self, due_at: DateTime<Utc>) -> Self {
        self.due_at = Some(due_at);
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Clamped into 0.0..=1.0.
    pub fn with_regret(mut self, regret: f64) -> Self {
        self.regret = regret.clamp(0.0, 1.0);
        self
    }

    /// Clamped into 0.0..=1.0.
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence.clamp(0.0, 1.0);
        self
    }

    pub fn with_intersection(mut self, intersection_id: impl Into<String>) -> Self {
        self.intersection_id = Some(intersection_id.into());
        self
    }

    pub fn with_person(mut self, person_ref: impl Into<String>) -> Self {
        self.person_ref = Some(person_ref.into());
        self
    }

    pub fn with_vendor(mut self, vendor_ref: impl Into<String>) -> Self {
        self.vendor_ref = Some(vendor_ref.into());
        self
    }

    pub fn validate(&self) -> ValidationResult {
        if self.id.is_empty() {
            return Err(ValidationError::MissingId("obligation"));
        }
        if self.circle.is_empty() {
            return Err(ValidationError::MissingField {
                record: "obligation",
                field: "circle",
            });
        }
        if self.source_ref.is_empty() {
            return Err(ValidationError::MissingField {
                record: "obligation",
                field: "source_ref",
            });
        }
        if !(0.0..=1.0).contains(&self.regret) {
            return Err(ValidationError::OutOfRange {
                field: "regret",
                value: self.regret.to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(ValidationError::OutOfRange {
                field: "confidence",
                value: self.confidence.to_string(),
            });
        }
        Ok(())
    }
}
