//! Decision log entries
//!
//! One entry per processed feedback record, in input order. The canonical
//! string is the audit contract: identical inputs to the engine reproduce
//! these byte-for-byte.

use serde::{Deserialize, Serialize};
use vigil_hash::canonical_values;

/// What the engine did with one feedback record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecisionAction {
    ThresholdIncrease,
    ThresholdDecrease,
    TriggerBiasIncrease,
    TriggerBiasDecrease,
    SuppressionCreated,
    NoChange,
}

impl DecisionAction {
    pub fn canonical_str(&self) -> &'static str {
        match self {
            DecisionAction::ThresholdIncrease => "threshold_increase",
            DecisionAction::ThresholdDecrease => "threshold_decrease",
            DecisionAction::TriggerBiasIncrease => "trigger_bias_increase",
            DecisionAction::TriggerBiasDecrease => "trigger_bias_decrease",
            DecisionAction::SuppressionCreated => "suppression_created",
            DecisionAction::NoChange => "no_change",
        }
    }
}

/// Audit entry for one processed feedback record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub feedback_id: String,
    pub action: DecisionAction,
    pub reason: String,
    pub details: String,
}

impl DecisionRecord {
    pub fn new(
        feedback_id: impl Into<String>,
        action: DecisionAction,
        reason: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            feedback_id: feedback_id.into(),
            action,
            reason: reason.into(),
            details: details.into(),
        }
    }

    pub fn canonical_string(&self) -> String {
        canonical_values(&[
            "decision",
            &self.feedback_id,
            self.action.canonical_str(),
            &self.reason,
            &self.details,
        ])
    }
}
