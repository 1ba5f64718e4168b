//! Feedback records: immutable user signals
//!
//! Append-only; consumed by the learning engine through a history lookup.

use crate::{unix, FeedbackTarget, Signal, ValidationError, ValidationResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use vigil_hash::{canonical_values, record_id};

/// An immutable user signal about an interruption or draft.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FeedbackRecord {
    /// 16-hex hash of (target, target_id, circle, captured_at, signal)
    pub id: String,
    pub target: FeedbackTarget,
    pub target_id: String,
    pub circle: String,
    pub captured_at: DateTime<Utc>,
    pub signal: Signal,
    /// Free-form user reason, may be empty
    pub reason: String,
}

impl FeedbackRecord {
    pub fn new(
        target: FeedbackTarget,
        target_id: impl Into<String>,
        circle: impl Into<String>,
        captured_at: DateTime<Utc>,
        signal: Signal,
        reason: impl Into<String>,
    ) -> Self {
        let target_id = target_id.into();
        let circle = circle.into();
        let id = record_id(&canonical_values(&[
            "feedback",
            target.canonical_str(),
            &target_id,
            &circle,
            &unix(captured_at).to_string(),
            signal.canonical_str(),
        ]));
        Self {
            id,
            target,
            target_id,
            circle,
            captured_at,
            signal,
            reason: reason.into(),
        }
    }

    pub fn validate(&self) -> ValidationResult {
        if self.id.is_empty() {
            return Err(ValidationError::MissingId("feedback"));
        }
        if self.target_id.is_empty() {
            return Err(ValidationError::MissingField {
                record: "feedback",
                field: "target_id",
            });
        }
        if self.circle.is_empty() {
            return Err(ValidationError::MissingField {
                record: "feedback",
                field: "circle",
            });
        }
        Ok(())
    }
}

/// Per-record context the learning engine receives alongside feedback:
/// which trigger fired and which person/vendor was involved, when known.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FeedbackContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<String>,
}

impl FeedbackContext {
    pub fn with_trigger(trigger: impl Into<String>) -> Self {
        Self {
            trigger: Some(trigger.into()),
            ..Default::default()
        }
    }

    pub fn and_person(mut self, person_id: impl Into<String>) -> Self {
        self.person_id = Some(person_id.into());
        self
    }

    pub fn and_vendor(mut self, vendor_id: impl Into<String>) -> Self {
        self.vendor_id = Some(vendor_id.into());
        self
    }
}
