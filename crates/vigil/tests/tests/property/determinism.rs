//! Property tests: identical inputs always produce identical outputs.
//!
//! Covers classification ids, full-pipeline interruption ids, plan hashes,
//! and explain hashes across re-runs with identically seeded state.

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use vigil_classify::{Classifier, ClassifierConfig};
use vigil_pipeline::Cycle;
use vigil_plan::{CirclePrefs, DeliveryPrefs};
use vigil_policy::{CirclePolicy, PolicySet};
use vigil_suppress::SuppressionSet;
use vigil_types::{Obligation, ObligationKind, Severity, SourceType};

fn t0() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 4, 10, 9, 0, 0).unwrap()
}

fn arb_kind() -> impl Strategy<Value = ObligationKind> {
    prop_oneof![
        Just(ObligationKind::Reply),
        Just(ObligationKind::Pay),
        Just(ObligationKind::Decide),
        Just(ObligationKind::Review),
        Just(ObligationKind::Renew),
        Just(ObligationKind::Attend),
    ]
}

fn arb_source() -> impl Strategy<Value = SourceType> {
    prop_oneof![
        Just(SourceType::Email),
        Just(SourceType::Calendar),
        Just(SourceType::Finance),
        Just(SourceType::Commerce),
        Just(SourceType::Manual),
    ]
}

fn arb_severity() -> impl Strategy<Value = Severity> {
    prop_oneof![
        Just(Severity::Low),
        Just(Severity::Medium),
        Just(Severity::High),
        Just(Severity::Critical),
    ]
}

prop_compose! {
    fn arb_obligation()(
        n in 0u32..1000,
        circle in prop_oneof![Just("work"), Just("family"), Just("finance")],
        kind in arb_kind(),
        source in arb_source(),
        severity in arb_severity(),
        regret in 0.0f64..=1.0,
        confidence in 0.0f64..=1.0,
        due_hours in proptest::option::of(1i64..240),
    ) -> Obligation {
        let mut ob = Obligation::new(
            format!("ob-{}", n),
            circle,
            kind,
            source,
            format!("src-{}", n),
            format!("Item {}", n),
        )
        .with_severity(severity)
        .with_regret(regret)
        .with_confidence(confidence);
        if let Some(hours) = due_hours {
            ob = ob.with_due(t0() + Duration::hours(hours));
        }
        ob
    }
}

fn fresh_cycle() -> Cycle {
    Cycle::new(
        PolicySet::with_circles(
            t0(),
            vec![
                CirclePolicy::new("work"),
                CirclePolicy::new("family"),
                CirclePolicy::new("finance"),
            ],
        ),
        SuppressionSet::new(),
        DeliveryPrefs::new()
            .with_circle(CirclePrefs::new("work", "p-owner"))
            .with_circle(CirclePrefs::new("family", "p-owner"))
            .with_circle(CirclePrefs::new("finance", "p-owner")),
    )
}

proptest! {
    /// Classifying the same obligation twice yields identical ids, reasons,
    /// and breakdowns.
    #[test]
    fn classification_is_a_pure_function(ob in arb_obligation()) {
        let classifier = Classifier::new(ClassifierConfig::default());
        let policy = PolicySet::new(t0());
        let a = classifier.classify(&ob, &policy, t0());
        let b = classifier.classify(&ob, &policy, t0());
        prop_assert_eq!(a.interruption.id, b.interruption.id);
        prop_assert_eq!(a.interruption.dedup_key, b.interruption.dedup_key);
        prop_assert_eq!(a.reasons, b.reasons);
        prop_assert_eq!(a.breakdown, b.breakdown);
    }

    /// Two full pipeline runs against identically seeded state yield
    /// identical interruption ids, plan hash, and explain hashes.
    #[test]
    fn pipeline_replays_bit_identically(
        obligations in proptest::collection::vec(arb_obligation(), 0..8)
    ) {
        let run = || {
            let mut cycle = fresh_cycle();
            let report = cycle.run(&obligations, t0());
            (
                report.interruptions.iter().map(|i| i.id.clone()).collect::<Vec<_>>(),
                report.plan_hash(),
                report.explains.iter().map(|e| e.hash.clone()).collect::<Vec<_>>(),
            )
        };
        prop_assert_eq!(run(), run());
    }
}
