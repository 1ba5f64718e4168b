//! Classifier configuration
//!
//! Every scoring constant is configuration: thresholds, boosts, windows
//! and expiry all have defaults but none are hard-coded at use sites.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Scoring and leveling knobs for the classifier.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Base score per `"{circle}:{kind}"` key
    pub base_scores: BTreeMap<String, i32>,
    /// Base score when the circle-kind key is unconfigured
    pub default_base: i32,
    /// Boost when due within `due_soon_hours`
    pub due_soon_hours: i64,
    pub due_soon_boost: i32,
    /// Boost when due within `due_week_days` (but not soon)
    pub due_week_days: i64,
    pub due_week_boost: i32,
    /// Boost when the kind needs action or severity is High/Critical
    pub action_boost: i32,
    pub severity_high_boost: i32,
    pub severity_critical_boost: i32,
    /// Weight applied to the obligation's own regret (0..1)
    pub regret_weight: f64,
    /// Minimum score for Ambient level
    pub ambient_floor: i32,
    /// Urgent requires due within this many hours
    pub urgent_due_hours: i64,
    /// Notify requires due within this many hours
    pub notify_due_hours: i64,
    /// Expiry when the obligation has no due time
    pub default_expiry_days: i64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            base_scores: BTreeMap::new(),
            default_base: 15,
            due_soon_hours: 24,
            due_soon_boost: 30,
            due_week_days: 7,
            due_week_boost: 15,
            action_boost: 15,
            severity_high_boost: 10,
            severity_critical_boost: 20,
            regret_weight: 30.0,
            ambient_floor: 25,
            urgent_due_hours: 24,
            notify_due_hours: 48,
            default_expiry_days: 7,
        }
    }
}

impl ClassifierConfig {
    pub fn with_base_score(mut self, circle: &str, kind: &str, score: i32) -> Self {
        self.base_scores.insert(format!("{}:{}", circle, kind), score);
        self
    }

    pub fn base_score(&self, circle: &str, kind: &str) -> i32 {
        self.base_scores
            .get(&format!("{}:{}", circle, kind))
            .copied()
            .unwrap_or(self.default_base)
    }
}
