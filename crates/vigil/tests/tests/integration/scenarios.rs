//! Reference scenarios exercised end to end across crates.

use chrono::{DateTime, Duration, TimeZone, Utc};
use vigil_classify::{Classifier, ClassifierConfig, QuotaEnforcer};
use vigil_learn::{apply_feedback, DecisionAction, LearnConfig};
use vigil_policy::{CirclePolicy, PolicySet};
use vigil_store::{MemoryFeedbackHistory, MemoryQuotaStore};
use vigil_suppress::{SuppressionRule, SuppressionSet};
use vigil_types::{
    FeedbackContext, FeedbackRecord, FeedbackTarget, Interruption, Level, Obligation,
    ObligationKind, Severity, Signal, SourceType, SuppressionScope, SuppressionSource, Trigger,
};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 4, 10, 9, 0, 0).unwrap()
}

#[test]
fn critical_finance_obligation_clamps_to_urgent() {
    let ob = Obligation::new(
        "ob-1",
        "finance",
        ObligationKind::Pay,
        SourceType::Finance,
        "bill-42",
        "Pay the electricity bill",
    )
    .with_due(t0() + Duration::hours(2))
    .with_severity(Severity::Critical)
    .with_regret(0.9);

    let c = Classifier::new(ClassifierConfig::default()).classify(&ob, &PolicySet::new(t0()), t0());
    assert_eq!(c.interruption.regret, 100);
    assert_eq!(c.interruption.level, Level::Urgent);
}

#[test]
fn work_email_due_in_three_days_scores_seventy_and_queues() {
    let ob = Obligation::new(
        "ob-2",
        "work",
        ObligationKind::Reply,
        SourceType::Email,
        "msg-9",
        "Reply to the vendor",
    )
    .with_due(t0() + Duration::days(3))
    .with_severity(Severity::High)
    .with_regret(0.5);

    let c = Classifier::new(ClassifierConfig::default()).classify(&ob, &PolicySet::new(t0()), t0());
    assert_eq!(c.interruption.regret, 70);
    assert_eq!(c.interruption.level, Level::Queued);
}

#[test]
fn identical_rule_arguments_produce_identical_rule_ids() {
    let build = || {
        SuppressionRule::new(
            "work",
            SuppressionScope::Trigger,
            "newsletter",
            t0(),
            None,
            "reason",
            SuppressionSource::Feedback,
        )
    };
    assert_eq!(build().id, build().id);
}

#[test]
fn unnecessary_feedback_bumps_threshold_from_sixty_to_sixty_five() {
    let policy = PolicySet::with_circles(
        t0(),
        vec![CirclePolicy::new("work").with_thresholds(60, 75, 90)],
    );
    let record = FeedbackRecord::new(
        FeedbackTarget::Interruption,
        "int-1",
        "work",
        t0(),
        Signal::Unnecessary,
        "",
    );

    let outcome = apply_feedback(
        &[record],
        &[],
        &policy,
        &SuppressionSet::new(),
        &MemoryFeedbackHistory::new(),
        t0(),
        &LearnConfig::default(),
    )
    .unwrap();

    assert_eq!(
        outcome.policy_after.circle("work").unwrap().regret_threshold,
        65
    );
    assert_eq!(
        outcome.decisions[0].action,
        DecisionAction::ThresholdIncrease
    );
}

#[test]
fn helpful_feedback_creates_trigger_policy_with_bias_five() {
    let record = FeedbackRecord::new(
        FeedbackTarget::Interruption,
        "int-1",
        "work",
        t0(),
        Signal::Helpful,
        "",
    );

    let outcome = apply_feedback(
        &[record],
        &[FeedbackContext::with_trigger("new_trigger")],
        &PolicySet::new(t0()),
        &SuppressionSet::new(),
        &MemoryFeedbackHistory::new(),
        t0(),
        &LearnConfig::default(),
    )
    .unwrap();

    assert_eq!(
        outcome.policy_after.trigger("new_trigger").unwrap().regret_bias,
        5
    );
    assert_eq!(
        outcome.decisions[0].action,
        DecisionAction::TriggerBiasIncrease
    );
}

#[test]
fn four_notify_interruptions_with_quota_two_downgrade_exactly_two() {
    let interruptions: Vec<Interruption> = (0..4)
        .map(|n| {
            Interruption::new(
                "work",
                Trigger::ReplyNeeded,
                Level::Notify,
                80,
                90,
                format!("msg-{}", n),
                format!("ob-{}", n),
                format!("Item {}", n),
                t0() + Duration::days(1),
                t0(),
                format!("dedup-{}", n),
            )
        })
        .collect();

    let policy = PolicySet::with_circles(t0(), vec![CirclePolicy::new("work")]);
    let mut store = MemoryQuotaStore::new();
    let report = QuotaEnforcer::apply(&mut store, &policy, interruptions, t0());

    let surfaced = report
        .outcomes
        .iter()
        .filter(|o| o.interruption.level.counts_against_quota())
        .count();
    let queued = report
        .outcomes
        .iter()
        .filter(|o| o.interruption.level == Level::Queued)
        .count();
    assert_eq!(surfaced, 2);
    assert_eq!(queued, 2);
    assert_eq!(report.downgraded, 2);
}
