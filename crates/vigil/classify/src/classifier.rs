//! Obligation classifier
//!
//! Pure function: one obligation plus the current time and read-only
//! policy in, one scored and leveled interruption out. The breakdown and
//! ordered reasons feed the explainability builder.

use crate::ClassifierConfig;
use chrono::{DateTime, Duration, Utc};
use tracing::debug;
use vigil_explain::ScoreBreakdown;
use vigil_hash::{canonical_values, record_id};
use vigil_policy::PolicySet;
use vigil_types::{day_key, hour_key, Interruption, Level, Obligation, Severity, Trigger};

/// Classifier output: the interruption plus its audit ingredients.
#[derive(Clone, Debug)]
pub struct Classification {
    pub interruption: Interruption,
    pub breakdown: ScoreBreakdown,
    /// Ordered human-readable reasons, ready for the explain builder
    pub reasons: Vec<String>,
}

/// Obligation → Interruption. No side effects, no wall-clock reads.
#[derive(Clone, Debug, Default)]
pub struct Classifier {
    config: ClassifierConfig,
}

impl Classifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    pub fn classify(
        &self,
        obligation: &Obligation,
        policy: &PolicySet,
        now: DateTime<Utc>,
    ) -> Classification {
        let cfg = &self.config;
        let trigger = Trigger::derive(obligation.kind, obligation.source);
        let circle_policy = policy.circle_or_default(&obligation.circle);

        let mut reasons = Vec::new();

        let base = cfg.base_score(&obligation.circle, obligation.kind.canonical_str());
        reasons.push(format!(
            "base {} for {}:{}",
            base,
            obligation.circle,
            obligation.kind.canonical_str()
        ));

        let due_boost = match obligation.due_at {
            Some(due) if due <= now + Duration::hours(cfg.due_soon_hours) => {
                reasons.push(format!(
                    "due within {}h (+{})",
                    cfg.due_soon_hours, cfg.due_soon_boost
                ));
                cfg.due_soon_boost
            }
            Some(due) if due <= now + Duration::days(cfg.due_week_days) => {
                reasons.push(format!(
                    "due within {}d (+{})",
                    cfg.due_week_days, cfg.due_week_boost
                ));
                cfg.due_week_boost
            }
            _ => 0,
        };

        let action_boost = if obligation.kind.needs_action() || obligation.severity >= Severity::High
        {
            reasons.push(format!("action needed (+{})", cfg.action_boost));
            cfg.action_boost
        } else {
            0
        };

        let regret_component = (obligation.regret * cfg.regret_weight).round() as i32;
        if regret_component != 0 {
            reasons.push(format!(
                "own regret {:.2} (+{})",
                obligation.regret, regret_component
            ));
        }

        let severity_boost = match obligation.severity {
            Severity::Critical => {
                reasons.push(format!(
                    "severity critical (+{})",
                    cfg.severity_critical_boost
                ));
                cfg.severity_critical_boost
            }
            Severity::High => {
                reasons.push(format!("severity high (+{})", cfg.severity_high_boost));
                cfg.severity_high_boost
            }
            _ => 0,
        };

        let trigger_bias = policy.trigger_bias(trigger.canonical_str());
        if trigger_bias != 0 {
            reasons.push(format!("trigger bias {:+}", trigger_bias));
        }

        let raw = base + due_boost + action_boost + regret_component + severity_boost + trigger_bias;
        let score = raw.clamp(0, 100) as u8;
        let confidence = (obligation.confidence * 100.0).round().clamp(0.0, 100.0) as u8;

        let level = self.level_for(score, obligation.due_at, &circle_policy, now, &mut reasons);

        let expires_at = obligation
            .due_at
            .unwrap_or(now + Duration::days(cfg.default_expiry_days));

        let bucket = if matches!(level, Level::Urgent | Level::Notify) {
            hour_key(now)
        } else {
            day_key(now)
        };
        let dedup_key = record_id(&canonical_values(&[
            "dedup",
            &obligation.circle,
            trigger.canonical_str(),
            &obligation.source_ref,
            &bucket,
        ]));

        let mut interruption = Interruption::new(
            &obligation.circle,
            trigger,
            level,
            score,
            confidence,
            &obligation.source_ref,
            &obligation.id,
            &obligation.summary,
            expires_at,
            now,
            dedup_key,
        );
        if let Some(ix) = &obligation.intersection_id {
            interruption = interruption.with_intersection(ix.clone());
        }

        debug!(
            obligation = %obligation.id,
            circle = %obligation.circle,
            trigger = trigger.canonical_str(),
            score,
            level = level.canonical_str(),
            "Obligation classified"
        );

        Classification {
            interruption,
            breakdown: ScoreBreakdown {
                circle_base: base,
                due_boost,
                action_boost,
                severity_boost,
                trigger_bias,
                final_score: score,
            },
            reasons,
        }
    }

    fn level_for(
        &self,
        score: u8,
        due_at: Option<DateTime<Utc>>,
        policy: &vigil_policy::CirclePolicy,
        now: DateTime<Utc>,
        reasons: &mut Vec<String>,
    ) -> Level {
        let cfg = &self.config;
        let score = score as i32;
        let due_within =
            |hours: i64| due_at.is_some_and(|due| due <= now + Duration::hours(hours));

        if score >= policy.urgent_threshold && due_within(cfg.urgent_due_hours) {
            reasons.push(format!(
                "score {} ≥ urgent threshold {} and due within {}h → urgent",
                score, policy.urgent_threshold, cfg.urgent_due_hours
            ));
            Level::Urgent
        } else if score >= policy.notify_threshold && due_within(cfg.notify_due_hours) {
            reasons.push(format!(
                "score {} ≥ notify threshold {} and due within {}h → notify",
                score, policy.notify_threshold, cfg.notify_due_hours
            ));
            Level::Notify
        } else if score >= policy.regret_threshold {
            reasons.push(format!(
                "score {} ≥ regret threshold {} → queued",
                score, policy.regret_threshold
            ));
            Level::Queued
        } else if score >= cfg.ambient_floor {
            reasons.push(format!(
                "score {} ≥ ambient floor {} → ambient",
                score, cfg.ambient_floor
            ));
            Level::Ambient
        } else {
            reasons.push(format!(
                "score {} below ambient floor {} → silent",
                score, cfg.ambient_floor
            ));
            Level::Silent
        }
    }
}
