//! One circle partition's decision loop
//!
//! Stage order is fixed: classify → dedup → quota → sort → plan. Dedup
//! runs before quota so a dropped repeat never consumes quota budget.
//! Explain records are assembled after planning so suppression hits land
//! in them.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::info;
use vigil_classify::{Classification, Classifier, ClassifierConfig, Deduplicator, QuotaEnforcer};
use vigil_explain::{ExplainBuilder, ExplainRecord};
use vigil_learn::{apply_feedback, DecisionRecord, LearnConfig, LearnError};
use vigil_plan::{plan_digest, rollup, DeliveryPrefs, DigestPlan, PlanReport, Planner};
use vigil_policy::PolicySet;
use vigil_store::{DedupStore, FeedbackHistory, MemoryDedupStore, MemoryQuotaStore, QuotaStore};
use vigil_suppress::SuppressionSet;
use vigil_types::{FeedbackContext, FeedbackRecord, Interruption, Obligation};

/// Everything one `run` produced.
#[derive(Debug)]
pub struct CycleReport {
    /// Post-quota interruptions in surfacing order
    pub interruptions: Vec<Interruption>,
    pub plan: PlanReport,
    pub explains: Vec<ExplainRecord>,
    pub deduped: usize,
    pub quota_downgraded: u32,
}

impl CycleReport {
    /// Order-independent hash of the planned notifications.
    pub fn plan_hash(&self) -> String {
        self.plan.plan.hash()
    }
}

/// Everything one `learn` call produced.
#[derive(Debug)]
pub struct LearnReport {
    pub decisions: Vec<DecisionRecord>,
    pub policy_version_before: u64,
    pub policy_version_after: u64,
    pub suppression_version_after: u64,
    pub rules_added: usize,
}

/// Owns the mutable state of one circle partition and runs the loop
/// against it. Callers needing parallelism partition by circle and give
/// each partition its own `Cycle`.
pub struct Cycle {
    classifier: Classifier,
    policy: PolicySet,
    suppression: SuppressionSet,
    prefs: DeliveryPrefs,
    learn_config: LearnConfig,
    dedup_store: Box<dyn DedupStore>,
    quota_store: Box<dyn QuotaStore>,
}

impl Cycle {
    /// In-memory stores, default classifier and learning constants.
    pub fn new(policy: PolicySet, suppression: SuppressionSet, prefs: DeliveryPrefs) -> Self {
        Self {
            classifier: Classifier::new(ClassifierConfig::default()),
            policy,
            suppression,
            prefs,
            learn_config: LearnConfig::default(),
            dedup_store: Box::new(MemoryDedupStore::new()),
            quota_store: Box::new(MemoryQuotaStore::new()),
        }
    }

    pub fn with_classifier(mut self, config: ClassifierConfig) -> Self {
        self.classifier = Classifier::new(config);
        self
    }

    pub fn with_learn_config(mut self, config: LearnConfig) -> Self {
        self.learn_config = config;
        self
    }

    /// Swap in durable store implementations.
    pub fn with_stores(
        mut self,
        dedup: Box<dyn DedupStore>,
        quota: Box<dyn QuotaStore>,
    ) -> Self {
        self.dedup_store = dedup;
        self.quota_store = quota;
        self
    }

    pub fn policy(&self) -> &PolicySet {
        &self.policy
    }

    pub fn suppression(&self) -> &SuppressionSet {
        &self.suppression
    }

    /// One forward pass of the loop.
    pub fn run(&mut self, obligations: &[Obligation], now: DateTime<Utc>) -> CycleReport {
        let classifications: Vec<Classification> = obligations
            .iter()
            .map(|ob| self.classifier.classify(ob, &self.policy, now))
            .collect();

        let interruptions: Vec<Interruption> = classifications
            .iter()
            .map(|c| c.interruption.clone())
            .collect();
        let (kept, deduped) = Deduplicator::apply(self.dedup_store.as_mut(), interruptions);

        let kept_ids: Vec<&str> = kept.iter().map(|i| i.id.as_str()).collect();
        let surviving: Vec<&Classification> = classifications
            .iter()
            .filter(|c| kept_ids.contains(&c.interruption.id.as_str()))
            .collect();

        let quota_report =
            QuotaEnforcer::apply(self.quota_store.as_mut(), &self.policy, kept, now);

        let mut interruptions = quota_report.interruptions();
        Interruption::sort_cycle(&mut interruptions);

        let plan = Planner::plan(
            &self.prefs,
            &self.policy,
            &self.suppression,
            self.quota_store.as_mut(),
            &interruptions,
            now,
        );

        let suppression_hits: HashMap<&str, &str> = plan
            .skipped
            .iter()
            .filter_map(|s| {
                s.rule_id
                    .as_deref()
                    .map(|rule| (s.interruption_id.as_str(), rule))
            })
            .collect();

        // Quota outcomes are index-aligned with the surviving classifications.
        let explains: Vec<ExplainRecord> = surviving
            .iter()
            .zip(quota_report.outcomes.iter())
            .map(|(classification, outcome)| {
                let interruption = &outcome.interruption;
                let mut builder = ExplainBuilder::new(&interruption.id)
                    .score(interruption.regret)
                    .level(interruption.level)
                    .reasons(classification.reasons.iter().cloned())
                    .breakdown(classification.breakdown);
                if let Some(snapshot) = outcome.snapshot {
                    if snapshot.downgraded {
                        builder = builder.reason(format!(
                            "daily quota reached ({}/{}) → queued",
                            snapshot.used, snapshot.limit
                        ));
                    }
                    builder = builder.quota(snapshot);
                }
                if let Some(rule_id) = suppression_hits.get(interruption.id.as_str()) {
                    builder = builder
                        .reason("suppressed by active rule")
                        .suppression_hit(*rule_id);
                }
                builder.build()
            })
            .collect();

        info!(
            obligations = obligations.len(),
            surfaced = interruptions.len(),
            deduped,
            quota_downgraded = quota_report.downgraded,
            planned = plan.planned(),
            "Cycle complete"
        );

        CycleReport {
            interruptions,
            plan,
            explains,
            deduped,
            quota_downgraded: quota_report.downgraded,
        }
    }

    /// Compose the digest for one circle from this cycle's interruptions.
    pub fn digest(
        &self,
        circle: &str,
        interruptions: &[Interruption],
        now: DateTime<Utc>,
    ) -> DigestPlan {
        let in_circle: Vec<Interruption> = interruptions
            .iter()
            .filter(|i| i.circle == circle)
            .cloned()
            .collect();
        let items = rollup(&in_circle);
        plan_digest(circle, &items, &self.prefs, now)
    }

    /// Feed feedback through the learning engine, then install the new
    /// policy version and any learned suppression rules.
    pub fn learn(
        &mut self,
        records: &[FeedbackRecord],
        contexts: &[FeedbackContext],
        history: &dyn FeedbackHistory,
        now: DateTime<Utc>,
    ) -> Result<LearnReport, LearnError> {
        let before = self.policy.version;
        let outcome = apply_feedback(
            records,
            contexts,
            &self.policy,
            &self.suppression,
            history,
            now,
            &self.learn_config,
        )?;

        self.policy = outcome.policy_after;
        let mut rules_added = 0;
        for rule in outcome.new_rules {
            if self.suppression.add_rule(rule) {
                rules_added += 1;
            }
        }

        Ok(LearnReport {
            decisions: outcome.decisions,
            policy_version_before: before,
            policy_version_after: self.policy.version,
            suppression_version_after: self.suppression.version,
            rules_added,
        })
    }
}
