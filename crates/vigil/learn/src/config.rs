//! Learning constants
//!
//! Product constants with no derivation behind them, kept as configuration
//! rather than hard-coded values so deployments can tune them.

use serde::{Deserialize, Serialize};

/// Step sizes, clamps, and windows for the learning engine.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct LearnConfig {
    /// Threshold bump for an unnecessary signal without trigger context
    pub threshold_step: i32,
    /// Threshold drop for a helpful signal without trigger context
    pub helpful_threshold_step: i32,
    /// Bias step, applied negative for unnecessary and positive for helpful
    pub bias_step: i32,
    pub threshold_floor: i32,
    pub threshold_ceiling: i32,
    pub bias_floor: i32,
    pub bias_ceiling: i32,
    /// Total occurrences (current + history) that escalate to a suppression
    pub repeat_count: usize,
    /// Trailing window consulted for repeat detection, in days
    pub window_days: i64,
    /// Lifetime of learned suppression rules, in days
    pub suppression_ttl_days: i64,
}

impl Default for LearnConfig {
    fn default() -> Self {
        Self {
            threshold_step: 5,
            helpful_threshold_step: 3,
            bias_step: 5,
            threshold_floor: 5,
            threshold_ceiling: 95,
            bias_floor: -50,
            bias_ceiling: 50,
            repeat_count: 2,
            window_days: 7,
            suppression_ttl_days: 30,
        }
    }
}
