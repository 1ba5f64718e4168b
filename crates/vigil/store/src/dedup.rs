//! Dedup key store contract

use std::collections::HashSet;

/// Records dedup keys across cycles. Infallible by contract; durable
/// implementations fail open (`contains` = false) rather than erroring.
pub trait DedupStore {
    fn contains(&self, key: &str) -> bool;
    fn record(&mut self, key: &str);
    fn clear(&mut self);
}

/// In-memory reference implementation.
#[derive(Clone, Debug, Default)]
pub struct MemoryDedupStore {
    keys: HashSet<String>,
}

impl MemoryDedupStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl DedupStore for MemoryDedupStore {
    fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    fn record(&mut self, key: &str) {
        self.keys.insert(key.to_string());
    }

    fn clear(&mut self) {
        self.keys.clear();
    }
}
