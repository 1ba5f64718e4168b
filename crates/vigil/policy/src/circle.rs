//! Per-circle policy knobs
//!
//! Invariant after every mutation: regret ≤ notify ≤ urgent. Threshold
//! deltas are applied through `with_*_delta`, which clamps into the
//! caller-supplied floor/ceiling and re-asserts monotonicity; thresholds
//! never move except through those constructors.

use serde::{Deserialize, Serialize};
use vigil_hash::canonical_fields;

/// Behavior knobs for one attention circle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CirclePolicy {
    pub circle: String,
    /// Minimum regret score to surface at Queued or above
    pub regret_threshold: i32,
    /// Minimum regret score for Notify level
    pub notify_threshold: i32,
    /// Minimum regret score for Urgent level
    pub urgent_threshold: i32,
    /// Daily cap on Notify/Urgent surfacing
    pub daily_notify_quota: u32,
    /// Daily cap on Queued items shown in queue views
    pub daily_queued_quota: u32,
    /// Private circles never share notifications beyond the owner
    pub private: bool,
}

impl CirclePolicy {
    /// Default thresholds 50/75/90, quota 2.
    pub fn new(circle: impl Into<String>) -> Self {
        Self {
            circle: circle.into(),
            regret_threshold: 50,
            notify_threshold: 75,
            urgent_threshold: 90,
            daily_notify_quota: 2,
            daily_queued_quota: 10,
            private: false,
        }
    }

    pub fn with_thresholds(mut self, regret: i32, notify: i32, urgent: i32) -> Self {
        self.regret_threshold = regret;
        self.notify_threshold = notify;
        self.urgent_threshold = urgent;
        self.assert_monotonic();
        self
    }

    pub fn with_notify_quota(mut self, quota: u32) -> Self {
        self.daily_notify_quota = quota;
        self
    }

    pub fn with_private(mut self, private: bool) -> Self {
        self.private = private;
        self
    }

    /// New policy with the regret threshold moved by `delta`, clamped into
    /// `[floor, ceiling]`, monotonicity re-asserted upward.
    pub fn with_regret_delta(&self, delta: i32, floor: i32, ceiling: i32) -> Self {
        let mut next = self.clone();
        next.regret_threshold = (next.regret_threshold + delta).clamp(floor, ceiling);
        next.assert_monotonic();
        next
    }

    /// Raise notify/urgent to keep regret ≤ notify ≤ urgent.
    fn assert_monotonic(&mut self) {
        if self.notify_threshold < self.regret_threshold {
            self.notify_threshold = self.regret_threshold;
        }
        if self.urgent_threshold < self.notify_threshold {
            self.urgent_threshold = self.notify_threshold;
        }
    }

    pub fn is_monotonic(&self) -> bool {
        self.regret_threshold <= self.notify_threshold
            && self.notify_threshold <= self.urgent_threshold
    }

    /// Hash input line for `PolicySet` hashing.
    pub fn canonical_string(&self) -> String {
        canonical_fields(&[
            ("circle", &self.circle),
            ("regret", &self.regret_threshold.to_string()),
            ("notify", &self.notify_threshold.to_string()),
            ("urgent", &self.urgent_threshold.to_string()),
            ("notify_quota", &self.daily_notify_quota.to_string()),
            ("queued_quota", &self.daily_queued_quota.to_string()),
            ("private", if self.private { "true" } else { "false" }),
        ])
    }
}
