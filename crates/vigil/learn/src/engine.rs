//! The learning engine
//!
//! Processes feedback records in the caller-supplied (already time-ordered)
//! sequence against a working copy of the policy entries. Changes made by
//! an earlier record in the batch are visible to later ones. A new
//! `PolicySet` version is built only when at least one entry actually
//! changed.

use crate::{DecisionAction, DecisionRecord, LearnConfig};
use chrono::{DateTime, Duration, Utc};
use thiserror::Error;
use tracing::{debug, info};
use vigil_policy::{CirclePolicy, PolicySet, TriggerPolicy};
use vigil_store::FeedbackHistory;
use vigil_suppress::{SuppressionRule, SuppressionSet};
use vigil_types::{FeedbackContext, FeedbackRecord, Signal, SuppressionScope, SuppressionSource};

/// Forward-compatibility error surface; no variant is produced today. A
/// future per-record validation failure skips that record and continues;
/// it never aborts the batch.
#[derive(Debug, Error)]
pub enum LearnError {
    #[error("invalid feedback record {id}: {message}")]
    InvalidRecord { id: String, message: String },
}

/// What one learning pass produced.
#[derive(Clone, Debug)]
pub struct LearnOutcome {
    /// New version when anything changed, otherwise a copy of the input
    pub policy_after: PolicySet,
    /// Candidate rules; insertion into the live set is the caller's job
    pub new_rules: Vec<SuppressionRule>,
    /// Hash of the suppression set as it would be with the new rules added
    pub suppression_hash_after: String,
    /// One entry per record, in input order
    pub decisions: Vec<DecisionRecord>,
}

impl LearnOutcome {
    pub fn policy_changed(&self, before: &PolicySet) -> bool {
        self.policy_after.version != before.version
    }
}

/// Apply a batch of feedback. `contexts` is parallel to `records`; missing
/// entries are treated as context-free.
pub fn apply_feedback(
    records: &[FeedbackRecord],
    contexts: &[FeedbackContext],
    policy: &PolicySet,
    suppression: &SuppressionSet,
    history: &dyn FeedbackHistory,
    now: DateTime<Utc>,
    config: &LearnConfig,
) -> Result<LearnOutcome, LearnError> {
    let empty_context = FeedbackContext::default();
    let mut state = BatchState::default();
    let mut decisions = Vec::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        let context = contexts.get(index).unwrap_or(&empty_context);
        let decision = match record.signal {
            Signal::Unnecessary => {
                process_unnecessary(record, context, policy, suppression, history, now, config, &mut state)
            }
            Signal::Helpful => process_helpful(record, context, policy, config, &mut state),
        };
        debug!(
            feedback = %record.id,
            action = decision.action.canonical_str(),
            "Feedback processed"
        );
        decisions.push(decision);
    }

    let policy_after = if state.circles.is_empty() && state.triggers.is_empty() {
        policy.clone()
    } else {
        let next = policy.with_changes(
            now,
            state.circles.into_values().collect(),
            state.triggers.into_values().collect(),
        );
        info!(
            version = next.version,
            hash = %next.hash,
            "Policy set updated from feedback"
        );
        next
    };

    let suppression_hash_after = if state.rules.is_empty() {
        suppression.hash.clone()
    } else {
        let mut preview = suppression.clone();
        for rule in &state.rules {
            preview.add_rule(rule.clone());
        }
        preview.hash
    };

    Ok(LearnOutcome {
        policy_after,
        new_rules: state.rules,
        suppression_hash_after,
        decisions,
    })
}

/// Working state accumulated across the batch. Circle and trigger maps hold
/// only entries that actually differ from the input policy.
#[derive(Default)]
struct BatchState {
    circles: std::collections::BTreeMap<String, CirclePolicy>,
    triggers: std::collections::BTreeMap<String, TriggerPolicy>,
    rules: Vec<SuppressionRule>,
}

impl BatchState {
    fn circle<'a>(&'a self, policy: &'a PolicySet, circle: &str) -> Option<&'a CirclePolicy> {
        self.circles.get(circle).or_else(|| policy.circle(circle))
    }

    fn trigger<'a>(&'a self, policy: &'a PolicySet, trigger: &str) -> Option<&'a TriggerPolicy> {
        self.triggers.get(trigger).or_else(|| policy.trigger(trigger))
    }

    fn has_pending_rule(&self, circle: &str, scope: SuppressionScope, key: &str) -> bool {
        self.rules
            .iter()
            .any(|r| r.circle == circle && r.scope == scope && r.key == key)
    }
}

#[allow(clippy::too_many_arguments)]
fn process_unnecessary(
    record: &FeedbackRecord,
    context: &FeedbackContext,
    policy: &PolicySet,
    suppression: &SuppressionSet,
    history: &dyn FeedbackHistory,
    now: DateTime<Utc>,
    config: &LearnConfig,
    state: &mut BatchState,
) -> DecisionRecord {
    let Some(trigger) = context.trigger.as_deref() else {
        return bump_threshold(record, policy, config, state);
    };

    let since = now - Duration::days(config.window_days);
    let prior = history
        .recent_unnecessary(&record.circle, trigger, since)
        .len();
    if prior + 1 >= config.repeat_count {
        return create_suppression(record, context, trigger, suppression, now, config, state);
    }

    // Known trigger, no repeat yet: nudge its bias down.
    let current = state
        .trigger(policy, trigger)
        .cloned()
        .unwrap_or_else(|| TriggerPolicy::new(trigger));
    let next = current.with_bias_delta(-config.bias_step, config.bias_floor, config.bias_ceiling);
    let details = format!(
        "trigger={} bias {}->{}",
        trigger, current.regret_bias, next.regret_bias
    );
    if next.regret_bias != current.regret_bias {
        state.triggers.insert(trigger.to_string(), next);
    }
    DecisionRecord::new(
        &record.id,
        DecisionAction::TriggerBiasDecrease,
        "unnecessary feedback for trigger",
        details,
    )
}

fn process_helpful(
    record: &FeedbackRecord,
    context: &FeedbackContext,
    policy: &PolicySet,
    config: &LearnConfig,
    state: &mut BatchState,
) -> DecisionRecord {
    if let Some(trigger) = context.trigger.as_deref() {
        let current = state
            .trigger(policy, trigger)
            .cloned()
            .unwrap_or_else(|| TriggerPolicy::new(trigger));
        let next =
            current.with_bias_delta(config.bias_step, config.bias_floor, config.bias_ceiling);
        let details = format!(
            "trigger={} bias {}->{}",
            trigger, current.regret_bias, next.regret_bias
        );
        if next.regret_bias != current.regret_bias {
            state.triggers.insert(trigger.to_string(), next);
        }
        return DecisionRecord::new(
            &record.id,
            DecisionAction::TriggerBiasIncrease,
            "helpful feedback for trigger",
            details,
        );
    }

    let current = state
        .circle(policy, &record.circle)
        .cloned()
        .unwrap_or_else(|| CirclePolicy::new(&record.circle));
    let next = current.with_regret_delta(
        -config.helpful_threshold_step,
        config.threshold_floor,
        config.threshold_ceiling,
    );
    let details = format!(
        "circle={} regret_threshold {}->{}",
        record.circle, current.regret_threshold, next.regret_threshold
    );
    if next != current {
        state.circles.insert(record.circle.clone(), next);
    }
    DecisionRecord::new(
        &record.id,
        DecisionAction::ThresholdDecrease,
        "helpful feedback without trigger context",
        details,
    )
}

fn bump_threshold(
    record: &FeedbackRecord,
    policy: &PolicySet,
    config: &LearnConfig,
    state: &mut BatchState,
) -> DecisionRecord {
    let current = state
        .circle(policy, &record.circle)
        .cloned()
        .unwrap_or_else(|| CirclePolicy::new(&record.circle));
    let next = current.with_regret_delta(
        config.threshold_step,
        config.threshold_floor,
        config.threshold_ceiling,
    );
    let details = format!(
        "circle={} regret_threshold {}->{}",
        record.circle, current.regret_threshold, next.regret_threshold
    );
    if next != current {
        state.circles.insert(record.circle.clone(), next);
    }
    DecisionRecord::new(
        &record.id,
        DecisionAction::ThresholdIncrease,
        "unnecessary feedback without trigger context",
        details,
    )
}

/// Scope preference: Person > Vendor > Trigger, by which identifier the
/// context carries.
fn create_suppression(
    record: &FeedbackRecord,
    context: &FeedbackContext,
    trigger: &str,
    suppression: &SuppressionSet,
    now: DateTime<Utc>,
    config: &LearnConfig,
    state: &mut BatchState,
) -> DecisionRecord {
    let (scope, key) = if let Some(person) = context.person_id.as_deref() {
        (SuppressionScope::Person, person.to_string())
    } else if let Some(vendor) = context.vendor_id.as_deref() {
        (SuppressionScope::Vendor, vendor.to_string())
    } else {
        (SuppressionScope::Trigger, trigger.to_string())
    };

    if suppression.has_active(now, &record.circle, scope, &key)
        || state.has_pending_rule(&record.circle, scope, &key)
    {
        return DecisionRecord::new(
            &record.id,
            DecisionAction::NoChange,
            "equivalent suppression rule already active",
            format!(
                "circle={} scope={} key={}",
                record.circle,
                scope.canonical_str(),
                key
            ),
        );
    }

    let rule = SuppressionRule::new(
        &record.circle,
        scope,
        &key,
        now,
        Some(now + Duration::days(config.suppression_ttl_days)),
        "repeated unnecessary feedback",
        SuppressionSource::Feedback,
    );
    let details = format!(
        "circle={} scope={} key={} rule={}",
        record.circle,
        scope.canonical_str(),
        key,
        rule.id
    );
    info!(
        rule_id = %rule.id,
        circle = %record.circle,
        scope = scope.canonical_str(),
        "Suppression rule learned from feedback"
    );
    state.rules.push(rule);
    DecisionRecord::new(
        &record.id,
        DecisionAction::SuppressionCreated,
        "repeated unnecessary feedback for trigger",
        details,
    )
}
