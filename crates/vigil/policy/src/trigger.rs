//! Per-trigger regret bias
//!
//! Keys are trigger canonical strings so the learning engine can create
//! policies for triggers it has never seen in configuration.

use serde::{Deserialize, Serialize};
use vigil_hash::canonical_fields;

/// Bias applied to the regret score of every interruption with this trigger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerPolicy {
    /// Trigger canonical string, e.g. `reply_needed`
    pub trigger: String,
    /// Bias in regret points, clamped to [-50, 50] on every adjustment
    pub regret_bias: i32,
}

impl TriggerPolicy {
    pub fn new(trigger: impl Into<String>) -> Self {
        Self {
            trigger: trigger.into(),
            regret_bias: 0,
        }
    }

    /// New policy with the bias moved by `delta`, clamped into
    /// `[floor, ceiling]`.
    pub fn with_bias_delta(&self, delta: i32, floor: i32, ceiling: i32) -> Self {
        Self {
            trigger: self.trigger.clone(),
            regret_bias: (self.regret_bias + delta).clamp(floor, ceiling),
        }
    }

    /// Hash input line for `PolicySet` hashing.
    pub fn canonical_string(&self) -> String {
        canonical_fields(&[
            ("trigger", &self.trigger),
            ("bias", &self.regret_bias.to_string()),
        ])
    }
}
