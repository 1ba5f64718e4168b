//! Property tests: suppression rules match only their own scope, and the
//! wildcard forms widen exactly circle and key, never scope.

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use vigil_suppress::{SuppressionRule, SuppressionSet};
use vigil_types::{SuppressionScope, SuppressionSource};

fn t0() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 4, 10, 9, 0, 0).unwrap()
}

fn arb_scope() -> impl Strategy<Value = SuppressionScope> {
    prop_oneof![
        Just(SuppressionScope::Circle),
        Just(SuppressionScope::Person),
        Just(SuppressionScope::Vendor),
        Just(SuppressionScope::Trigger),
        Just(SuppressionScope::ItemKey),
    ]
}

proptest! {
    /// A rule at one scope never matches a query at another, even with
    /// identical circle and key strings.
    #[test]
    fn scope_match_is_exact(
        rule_scope in arb_scope(),
        query_scope in arb_scope(),
        key in "[a-z]{3,10}",
    ) {
        let mut set = SuppressionSet::new();
        set.add_rule(SuppressionRule::new(
            "work",
            rule_scope,
            key.clone(),
            t0(),
            None,
            "muted",
            SuppressionSource::Feedback,
        ));

        let hit = set.find_match(t0(), "work", query_scope, &key).is_some();
        prop_assert_eq!(hit, rule_scope == query_scope);
    }

    /// Wildcard circle and key widen matching; scope stays exact.
    #[test]
    fn wildcards_widen_circle_and_key_only(
        circle in "[a-z]{3,8}",
        key in "[a-z]{3,8}",
        query_scope in arb_scope(),
    ) {
        let mut set = SuppressionSet::new();
        set.add_rule(SuppressionRule::new(
            "*",
            SuppressionScope::Trigger,
            "*",
            t0(),
            None,
            "muted",
            SuppressionSource::Manual,
        ));

        let hit = set.find_match(t0(), &circle, query_scope, &key).is_some();
        prop_assert_eq!(hit, query_scope == SuppressionScope::Trigger);
    }

    /// Identical constructor arguments always produce the same rule id.
    #[test]
    fn rule_ids_are_pure_functions(
        circle in "[a-z]{3,8}",
        key in "[a-z]{3,8}",
        scope in arb_scope(),
    ) {
        let build = || SuppressionRule::new(
            circle.clone(),
            scope,
            key.clone(),
            t0(),
            None,
            "reason ignored by the id",
            SuppressionSource::Feedback,
        );
        prop_assert_eq!(build().id, build().id);
    }
}
