//! Quota usage counter contract
//!
//! One contract, two counters: the quota enforcer uses scope `{circle}`,
//! the planner's per-channel quota uses scope `channel:{circle}:{channel}`.
//! Both are partitioned per circle, which is what makes per-circle
//! pipeline runs independent.

use std::collections::HashMap;

/// Daily usage counters keyed by (scope, UTC day key). Infallible by
/// contract; durable implementations fail open to zero usage.
pub trait QuotaStore {
    fn usage(&self, scope: &str, day_key: &str) -> u32;
    fn increment(&mut self, scope: &str, day_key: &str);
    fn clear(&mut self);
}

/// In-memory reference implementation.
#[derive(Clone, Debug, Default)]
pub struct MemoryQuotaStore {
    counters: HashMap<(String, String), u32>,
}

impl MemoryQuotaStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl QuotaStore for MemoryQuotaStore {
    fn usage(&self, scope: &str, day_key: &str) -> u32 {
        self.counters
            .get(&(scope.to_string(), day_key.to_string()))
            .copied()
            .unwrap_or(0)
    }

    fn increment(&mut self, scope: &str, day_key: &str) {
        *self
            .counters
            .entry((scope.to_string(), day_key.to_string()))
            .or_insert(0) += 1;
    }

    fn clear(&mut self) {
        self.counters.clear();
    }
}
