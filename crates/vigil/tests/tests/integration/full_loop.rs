//! The closed loop end to end: surface, give feedback, learn, and surface
//! again under the adjusted policy, deterministically.

use chrono::{DateTime, Duration, TimeZone, Utc};
use vigil_pipeline::Cycle;
use vigil_plan::{CirclePrefs, DeliveryPrefs};
use vigil_policy::{CirclePolicy, PolicySet};
use vigil_store::MemoryFeedbackHistory;
use vigil_suppress::SuppressionSet;
use vigil_types::{
    FeedbackContext, FeedbackRecord, FeedbackTarget, Obligation, ObligationKind, Severity,
    Signal, SourceType,
};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 4, 10, 9, 0, 0).unwrap()
}

fn obligation(n: u32) -> Obligation {
    Obligation::new(
        format!("ob-{}", n),
        "work",
        ObligationKind::Reply,
        SourceType::Email,
        format!("msg-{}", n),
        format!("Reply to message {}", n),
    )
    .with_due(t0() + Duration::hours(12))
    .with_severity(Severity::High)
    .with_regret(0.6)
}

fn fresh_cycle() -> Cycle {
    Cycle::new(
        PolicySet::with_circles(t0(), vec![CirclePolicy::new("work")]),
        SuppressionSet::new(),
        DeliveryPrefs::new().with_circle(CirclePrefs::new("work", "p-owner")),
    )
}

#[test]
fn feedback_shifts_the_next_cycle() {
    let mut cycle = fresh_cycle();

    // First pass: score 88 → Notify.
    let first = cycle.run(&[obligation(1)], t0());
    assert_eq!(first.plan.planned(), 1);
    let interruption_id = first.interruptions[0].id.clone();

    // The user marks it unnecessary; reply_needed picks up a -5 bias.
    let record = FeedbackRecord::new(
        FeedbackTarget::Interruption,
        &interruption_id,
        "work",
        t0() + Duration::minutes(5),
        Signal::Unnecessary,
        "not important",
    );
    let report = cycle
        .learn(
            &[record],
            &[FeedbackContext::with_trigger("reply_needed")],
            &MemoryFeedbackHistory::new(),
            t0() + Duration::minutes(5),
        )
        .unwrap();
    assert_eq!(report.policy_version_after, report.policy_version_before + 1);
    assert_eq!(cycle.policy().trigger_bias("reply_needed"), -5);

    // Next cycle, next hour bucket: score drops to 83, still Notify, but
    // the bias is visible in the breakdown.
    let later = t0() + Duration::hours(1);
    let second = cycle.run(&[obligation(2)], later);
    assert_eq!(second.interruptions[0].regret, 83);
    assert_eq!(second.explains[0].breakdown.unwrap().trigger_bias, -5);
}

#[test]
fn the_whole_loop_replays_identically() {
    let run = || {
        let mut cycle = fresh_cycle();
        let first = cycle.run(&[obligation(1), obligation(2)], t0());

        let record = FeedbackRecord::new(
            FeedbackTarget::Interruption,
            &first.interruptions[0].id,
            "work",
            t0() + Duration::minutes(5),
            Signal::Unnecessary,
            "",
        );
        let learn = cycle
            .learn(
                &[record],
                &[],
                &MemoryFeedbackHistory::new(),
                t0() + Duration::minutes(5),
            )
            .unwrap();

        let second = cycle.run(&[obligation(3)], t0() + Duration::hours(1));
        (
            first.plan_hash(),
            learn
                .decisions
                .iter()
                .map(|d| d.canonical_string())
                .collect::<Vec<_>>(),
            cycle.policy().hash.clone(),
            second.plan_hash(),
        )
    };
    assert_eq!(run(), run());
}

#[test]
fn policy_version_is_an_optimistic_concurrency_token() {
    let mut cycle = fresh_cycle();
    let before = cycle.policy().version;

    let record = FeedbackRecord::new(
        FeedbackTarget::Interruption,
        "int-1",
        "work",
        t0(),
        Signal::Unnecessary,
        "",
    );
    cycle
        .learn(&[record], &[], &MemoryFeedbackHistory::new(), t0())
        .unwrap();

    assert_eq!(cycle.policy().version, before + 1);
    assert!(cycle.policy().is_monotonic());
}
