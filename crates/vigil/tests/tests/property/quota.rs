//! Property tests: quota semantics hold for any mix of levels and any
//! limit. Urgent is never downgraded; Notify is downgraded exactly when
//! usage has reached the limit at evaluation time.

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use vigil_classify::QuotaEnforcer;
use vigil_policy::{CirclePolicy, PolicySet};
use vigil_store::{MemoryQuotaStore, QuotaStore};
use vigil_types::{Interruption, Level, Trigger};

fn t0() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 4, 10, 9, 0, 0).unwrap()
}

fn arb_level() -> impl Strategy<Value = Level> {
    prop_oneof![
        Just(Level::Silent),
        Just(Level::Ambient),
        Just(Level::Queued),
        Just(Level::Notify),
        Just(Level::Urgent),
    ]
}

fn interruption(level: Level, n: usize) -> Interruption {
    Interruption::new(
        "work",
        Trigger::ReplyNeeded,
        level,
        80,
        90,
        format!("msg-{}", n),
        format!("ob-{}", n),
        format!("Item {}", n),
        t0() + Duration::days(1),
        t0(),
        format!("dedup-{}", n),
    )
}

proptest! {
    #[test]
    fn urgent_is_never_downgraded_and_notify_only_at_limit(
        levels in proptest::collection::vec(arb_level(), 0..16),
        limit in 0u32..6,
    ) {
        let policy = PolicySet::with_circles(
            t0(),
            vec![CirclePolicy::new("work").with_notify_quota(limit)],
        );
        let items: Vec<Interruption> = levels
            .iter()
            .enumerate()
            .map(|(n, level)| interruption(*level, n))
            .collect();

        let mut store = MemoryQuotaStore::new();
        let report = QuotaEnforcer::apply(&mut store, &policy, items.clone(), t0());

        let mut expected_usage = 0u32;
        let mut expected_downgrades = 0u32;
        for (input, outcome) in items.iter().zip(report.outcomes.iter()) {
            match input.level {
                Level::Urgent => {
                    // Urgent always keeps its level.
                    prop_assert_eq!(outcome.interruption.level, Level::Urgent);
                    if expected_usage < limit {
                        expected_usage += 1;
                    }
                }
                Level::Notify => {
                    if expected_usage < limit {
                        prop_assert_eq!(outcome.interruption.level, Level::Notify);
                        expected_usage += 1;
                    } else {
                        prop_assert_eq!(outcome.interruption.level, Level::Queued);
                        expected_downgrades += 1;
                    }
                }
                other => {
                    prop_assert_eq!(outcome.interruption.level, other);
                    prop_assert!(outcome.snapshot.is_none());
                }
            }
        }
        prop_assert_eq!(report.downgraded, expected_downgrades);
        prop_assert_eq!(store.usage("work", "2025-04-10"), expected_usage);
    }

    /// A downgraded interruption gets a fresh id; untouched ones keep theirs.
    #[test]
    fn ids_change_exactly_on_downgrade(
        levels in proptest::collection::vec(arb_level(), 0..16),
    ) {
        let policy = PolicySet::with_circles(t0(), vec![CirclePolicy::new("work")]);
        let items: Vec<Interruption> = levels
            .iter()
            .enumerate()
            .map(|(n, level)| interruption(*level, n))
            .collect();

        let mut store = MemoryQuotaStore::new();
        let report = QuotaEnforcer::apply(&mut store, &policy, items.clone(), t0());
        for (input, outcome) in items.iter().zip(report.outcomes.iter()) {
            if outcome.interruption.level == input.level {
                prop_assert_eq!(&outcome.interruption.id, &input.id);
            } else {
                prop_assert_ne!(&outcome.interruption.id, &input.id);
            }
        }
    }
}
