//! Notification planner
//!
//! Per interruption: suppression gate, channel selection, quiet-hours and
//! per-channel quota downgrades, audience resolution. The notification is
//! always built with the originally selected channel and downgraded
//! afterwards so both channels survive into the audit hash. Private circles
//! force OwnerOnly regardless of intersection rules.

use crate::DeliveryPrefs;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use vigil_policy::PolicySet;
use vigil_store::QuotaStore;
use vigil_suppress::SuppressionSet;
use vigil_types::{
    day_key, Audience, Channel, Interruption, Level, Notification, NotificationPlan,
    SuppressionScope,
};

/// Fixed reason strings. These flow into reports and notification hashes,
/// so they are part of the wire contract.
pub struct SkipReason;

impl SkipReason {
    pub const SILENT_LEVEL: &'static str = "silent level";
    pub const PERSON_SUPPRESSION: &'static str = "person suppression";
    pub const QUIET_HOURS: &'static str = "quiet hours";
    pub const DAILY_QUOTA: &'static str = "daily quota";
}

/// An interruption the planner declined to surface, with why.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SkippedInterruption {
    pub interruption_id: String,
    pub reason: String,
    /// Id of the suppression rule that hit, when one did
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<String>,
}

/// Output of one planning pass.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlanReport {
    pub plan: NotificationPlan,
    pub skipped: Vec<SkippedInterruption>,
}

impl PlanReport {
    pub fn planned(&self) -> usize {
        self.plan.len()
    }
}

/// Plans outbound notifications for one cycle's interruptions.
pub struct Planner;

impl Planner {
    pub fn plan(
        prefs: &DeliveryPrefs,
        policy: &PolicySet,
        suppression: &SuppressionSet,
        channel_quota: &mut dyn QuotaStore,
        interruptions: &[Interruption],
        now: DateTime<Utc>,
    ) -> PlanReport {
        let day = day_key(now);
        let mut plan = NotificationPlan::new(now);
        let mut skipped = Vec::new();

        for interruption in interruptions {
            if interruption.level == Level::Silent {
                skipped.push(SkippedInterruption {
                    interruption_id: interruption.id.clone(),
                    reason: SkipReason::SILENT_LEVEL.to_string(),
                    rule_id: None,
                });
                continue;
            }

            if let Some(rule) = suppression.find_match(
                now,
                &interruption.circle,
                SuppressionScope::ItemKey,
                &interruption.dedup_key,
            ) {
                debug!(
                    interruption = %interruption.id,
                    rule_id = %rule.id,
                    "Interruption suppressed by item-key rule"
                );
                skipped.push(SkippedInterruption {
                    interruption_id: interruption.id.clone(),
                    reason: SkipReason::PERSON_SUPPRESSION.to_string(),
                    rule_id: Some(rule.id.clone()),
                });
                continue;
            }

            let circle_prefs = prefs.circle_or_default(&interruption.circle);
            let original_channel = match circle_prefs.channel_for(interruption.level) {
                Some(channel) => channel,
                None => {
                    skipped.push(SkippedInterruption {
                        interruption_id: interruption.id.clone(),
                        reason: SkipReason::SILENT_LEVEL.to_string(),
                        rule_id: None,
                    });
                    continue;
                }
            };

            let mut channel = original_channel;
            let mut downgrade_reason: Option<&'static str> = None;

            if let Some(quiet) = circle_prefs.quiet {
                let urgent_exempt = interruption.level == Level::Urgent && quiet.allow_urgent;
                if quiet.contains(now) && channel != Channel::WebBadge && !urgent_exempt {
                    channel = quiet.channel;
                    downgrade_reason = Some(SkipReason::QUIET_HOURS);
                }
            }

            if channel != Channel::WebBadge {
                if let Some(limit) = circle_prefs.channel_limit(channel) {
                    let scope = channel_scope(&interruption.circle, channel);
                    if channel_quota.usage(&scope, &day) >= limit {
                        channel = Channel::WebBadge;
                        downgrade_reason = Some(SkipReason::DAILY_QUOTA);
                    }
                }
            }

            let (audience, persons) = resolve_audience(prefs, policy, interruption, &circle_prefs.owner);

            let mut notification = Notification::new(
                &interruption.id,
                &interruption.circle,
                interruption.intersection_id.clone(),
                interruption.level,
                original_channel,
                interruption.trigger,
                audience,
                persons,
                &interruption.summary,
                now,
                interruption.expires_at,
                interruption.dedup_key.clone(),
            );
            if channel != original_channel {
                if let Some(reason) = downgrade_reason {
                    notification.downgrade(channel, reason);
                }
            }

            channel_quota.increment(&channel_scope(&interruption.circle, channel), &day);
            info!(
                notification = %notification.id,
                interruption = %interruption.id,
                circle = %interruption.circle,
                channel = channel.canonical_str(),
                original_channel = original_channel.canonical_str(),
                "Notification planned"
            );
            plan.add(notification);
        }

        PlanReport { plan, skipped }
    }
}

fn channel_scope(circle: &str, channel: Channel) -> String {
    format!("channel:{}:{}", circle, channel.canonical_str())
}

/// Default OwnerOnly; intersection rules apply only outside private
/// circles. The privacy boundary always wins.
fn resolve_audience(
    prefs: &DeliveryPrefs,
    policy: &PolicySet,
    interruption: &Interruption,
    owner: &str,
) -> (Audience, Vec<String>) {
    let private = policy.circle_or_default(&interruption.circle).private;
    if private {
        return (Audience::OwnerOnly, vec![owner.to_string()]);
    }
    if let Some(intersection_id) = &interruption.intersection_id {
        if let Some(rule) = prefs.intersection(intersection_id) {
            return (rule.audience, rule.resolve());
        }
    }
    (Audience::OwnerOnly, vec![owner.to_string()])
}
