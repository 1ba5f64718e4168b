//! Property tests: every clamped quantity stays inside its documented range
//! no matter the input, and thresholds stay monotonic after any sequence of
//! learning deltas.

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use vigil_classify::{Classifier, ClassifierConfig};
use vigil_policy::{CirclePolicy, PolicySet, TriggerPolicy};
use vigil_types::{Obligation, ObligationKind, Severity, SourceType};

fn t0() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 4, 10, 9, 0, 0).unwrap()
}

proptest! {
    /// Scores and confidence always land in [0,100], whatever the extractor
    /// reports and whatever bias the policy carries.
    #[test]
    fn score_and_confidence_stay_in_range(
        regret in -10.0f64..10.0,
        confidence in -10.0f64..10.0,
        bias in -200i32..200,
        due_hours in proptest::option::of(1i64..240),
    ) {
        let mut ob = Obligation::new("ob-1", "work", ObligationKind::Pay, SourceType::Finance, "src-1", "Pay")
            .with_severity(Severity::Critical)
            .with_regret(regret)
            .with_confidence(confidence);
        if let Some(hours) = due_hours {
            ob = ob.with_due(t0() + Duration::hours(hours));
        }

        let policy = PolicySet::new(t0()).with_changes(
            t0(),
            vec![],
            vec![TriggerPolicy::new("payment_due").with_bias_delta(bias, -50, 50)],
        );
        let c = Classifier::new(ClassifierConfig::default()).classify(&ob, &policy, t0());
        prop_assert!(c.interruption.regret <= 100);
        prop_assert!(c.interruption.confidence <= 100);
        prop_assert_eq!(c.breakdown.final_score, c.interruption.regret);
    }

    /// Any sequence of bias deltas keeps the bias in [-50, 50].
    #[test]
    fn trigger_bias_never_escapes_its_bounds(
        deltas in proptest::collection::vec(-100i32..100, 0..20)
    ) {
        let mut policy = TriggerPolicy::new("reply_needed");
        for delta in deltas {
            policy = policy.with_bias_delta(delta, -50, 50);
            prop_assert!((-50..=50).contains(&policy.regret_bias));
        }
    }

    /// Any sequence of threshold deltas keeps the regret threshold in
    /// [5, 95] and the circle monotonic.
    #[test]
    fn thresholds_stay_bounded_and_monotonic(
        deltas in proptest::collection::vec(-30i32..30, 0..20)
    ) {
        let mut policy = CirclePolicy::new("work");
        for delta in deltas {
            policy = policy.with_regret_delta(delta, 5, 95);
            prop_assert!((5..=95).contains(&policy.regret_threshold));
            prop_assert!(policy.is_monotonic());
        }
    }
}
