//! Cycle deduplicator
//!
//! Drops any interruption whose dedup key was already recorded; in this
//! cycle or a previous one if the store persists. Runs before quota
//! enforcement so repeats never consume quota budget.

use tracing::debug;
use vigil_store::DedupStore;
use vigil_types::Interruption;

/// Applies dedup-key filtering against a `DedupStore`.
pub struct Deduplicator;

impl Deduplicator {
    /// Filter out repeats and record the survivors. Returns the kept
    /// interruptions and the number dropped.
    pub fn apply(
        store: &mut dyn DedupStore,
        interruptions: Vec<Interruption>,
    ) -> (Vec<Interruption>, usize) {
        let total = interruptions.len();
        let mut kept = Vec::with_capacity(total);
        for interruption in interruptions {
            if store.contains(&interruption.dedup_key) {
                debug!(
                    interruption = %interruption.id,
                    dedup_key = %interruption.dedup_key,
                    "Duplicate interruption dropped"
                );
                continue;
            }
            store.record(&interruption.dedup_key);
            kept.push(interruption);
        }
        let dropped = total - kept.len();
        (kept, dropped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use vigil_store::MemoryDedupStore;
    use vigil_types::{Level, Trigger};

    fn interruption(dedup_key: &str) -> Interruption {
        let ts = Utc.with_ymd_and_hms(2025, 4, 10, 9, 0, 0).unwrap();
        Interruption::new(
            "work",
            Trigger::ReplyNeeded,
            Level::Notify,
            80,
            90,
            "msg-1",
            "ob-1",
            "Reply",
            ts,
            ts,
            dedup_key.to_string(),
        )
    }

    #[test]
    fn drops_repeats_within_a_cycle() {
        let mut store = MemoryDedupStore::new();
        let (kept, dropped) = Deduplicator::apply(
            &mut store,
            vec![interruption("k1"), interruption("k1"), interruption("k2")],
        );
        assert_eq!(kept.len(), 2);
        assert_eq!(dropped, 1);
    }

    #[test]
    fn drops_repeats_across_cycles_when_store_persists() {
        let mut store = MemoryDedupStore::new();
        let (kept, _) = Deduplicator::apply(&mut store, vec![interruption("k1")]);
        assert_eq!(kept.len(), 1);

        let (kept, dropped) = Deduplicator::apply(&mut store, vec![interruption("k1")]);
        assert!(kept.is_empty());
        assert_eq!(dropped, 1);
    }

    #[test]
    fn empty_input_is_a_noop() {
        let mut store = MemoryDedupStore::new();
        let (kept, dropped) = Deduplicator::apply(&mut store, vec![]);
        assert!(kept.is_empty());
        assert_eq!(dropped, 0);
    }
}
