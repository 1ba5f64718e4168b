//! Property tests: the plan hash is order-independent; any permutation of
//! the same notifications hashes identically, and any change to a
//! notification changes it.

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use vigil_types::{
    Audience, Channel, Level, Notification, NotificationPlan, Trigger,
};

fn t0() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 4, 10, 9, 0, 0).unwrap()
}

fn notification(n: usize) -> Notification {
    Notification::new(
        format!("int-{}", n),
        "work",
        None,
        Level::Notify,
        Channel::Push,
        Trigger::ReplyNeeded,
        Audience::OwnerOnly,
        vec!["p-owner".to_string()],
        format!("Item {}", n),
        t0(),
        t0() + Duration::days(1),
        format!("dedup-{}", n),
    )
}

proptest! {
    #[test]
    fn plan_hash_ignores_insertion_order(
        order in Just((0..8usize).collect::<Vec<_>>()).prop_shuffle()
    ) {
        let mut ordered = NotificationPlan::new(t0());
        for n in 0..8 {
            ordered.add(notification(n));
        }

        let mut shuffled = NotificationPlan::new(t0());
        for n in order {
            shuffled.add(notification(n));
        }

        prop_assert_eq!(ordered.hash(), shuffled.hash());
        prop_assert_eq!(ordered.plan_id(), shuffled.plan_id());
    }

    /// Dropping any single notification changes the hash.
    #[test]
    fn plan_hash_is_sensitive_to_membership(drop in 0usize..8) {
        let mut full = NotificationPlan::new(t0());
        let mut partial = NotificationPlan::new(t0());
        for n in 0..8 {
            full.add(notification(n));
            if n != drop {
                partial.add(notification(n));
            }
        }
        prop_assert_ne!(full.hash(), partial.hash());
    }
}
