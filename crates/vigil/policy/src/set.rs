//! Versioned policy bundle
//!
//! Copy-on-write: every change produces a new `PolicySet` with a bumped
//! version; prior versions are never mutated in place. Hash inputs are
//! built from key-sorted entries; unordered map iteration never reaches
//! the hasher.

use crate::{CirclePolicy, TriggerPolicy};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use vigil_hash::sha256_hex;
use vigil_types::unix;

/// Versioned bundle of circle and trigger policies.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PolicySet {
    /// Monotonic version, the optimistic-concurrency token
    pub version: u64,
    pub captured_at: DateTime<Utc>,
    /// Key-sorted by circle name
    pub circles: BTreeMap<String, CirclePolicy>,
    /// Key-sorted by trigger canonical string
    pub triggers: BTreeMap<String, TriggerPolicy>,
    /// Full SHA-256 over the sorted canonical entries
    pub hash: String,
}

impl PolicySet {
    /// Empty set at version 1.
    pub fn new(now: DateTime<Utc>) -> Self {
        let mut set = Self {
            version: 1,
            captured_at: now,
            circles: BTreeMap::new(),
            triggers: BTreeMap::new(),
            hash: String::new(),
        };
        set.hash = set.compute_hash();
        set
    }

    /// Seed a set with initial circle policies (configuration load path).
    pub fn with_circles(now: DateTime<Utc>, circles: Vec<CirclePolicy>) -> Self {
        let mut set = Self::new(now);
        for policy in circles {
            set.circles.insert(policy.circle.clone(), policy);
        }
        set.hash = set.compute_hash();
        set
    }

    pub fn circle(&self, circle: &str) -> Option<&CirclePolicy> {
        self.circles.get(circle)
    }

    /// Policy for a circle, falling back to defaults for circles the set
    /// has not seen yet.
    pub fn circle_or_default(&self, circle: &str) -> CirclePolicy {
        self.circles
            .get(circle)
            .cloned()
            .unwrap_or_else(|| CirclePolicy::new(circle))
    }

    pub fn trigger(&self, trigger: &str) -> Option<&TriggerPolicy> {
        self.triggers.get(trigger)
    }

    /// Regret bias for a trigger; unconfigured triggers are unbiased.
    pub fn trigger_bias(&self, trigger: &str) -> i32 {
        self.triggers.get(trigger).map_or(0, |t| t.regret_bias)
    }

    /// Build the successor set: all prior entries copied, changes overlaid,
    /// version bumped, hash recomputed. `self` is left untouched.
    pub fn with_changes(
        &self,
        now: DateTime<Utc>,
        circle_changes: Vec<CirclePolicy>,
        trigger_changes: Vec<TriggerPolicy>,
    ) -> PolicySet {
        let mut next = PolicySet {
            version: self.version + 1,
            captured_at: now,
            circles: self.circles.clone(),
            triggers: self.triggers.clone(),
            hash: String::new(),
        };
        for policy in circle_changes {
            next.circles.insert(policy.circle.clone(), policy);
        }
        for policy in trigger_changes {
            next.triggers.insert(policy.trigger.clone(), policy);
        }
        next.hash = next.compute_hash();
        next
    }

    /// Hash over version, capture time, and key-sorted entries. BTreeMap
    /// iteration is key-ordered, which keeps this reproducible.
    pub fn compute_hash(&self) -> String {
        let mut parts: Vec<String> = vec![
            format!("policy_set:v{}", self.version),
            format!("captured:{}", unix(self.captured_at)),
        ];
        parts.extend(self.circles.values().map(|c| c.canonical_string()));
        parts.extend(self.triggers.values().map(|t| t.canonical_string()));
        sha256_hex(&parts.join("|"))
    }

    /// Every circle policy satisfies regret ≤ notify ≤ urgent.
    pub fn is_monotonic(&self) -> bool {
        self.circles.values().all(CirclePolicy::is_monotonic)
    }
}
