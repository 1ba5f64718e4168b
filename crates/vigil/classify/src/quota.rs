//! Per-circle daily quota enforcement
//!
//! Usage is keyed by (circle, UTC day). Semantics are asymmetric by level:
//! Urgent is never downgraded; at quota it passes silently without
//! consuming budget; Notify at quota downgrades to Queued (summary
//! annotated, id recomputed) and also does not consume budget. Under
//! quota, both levels increment usage, so an Urgent item still eats the
//! budget of a later Notify.

use tracing::{debug, info};
use vigil_explain::QuotaSnapshot;
use vigil_policy::PolicySet;
use vigil_store::QuotaStore;
use vigil_types::{day_key, Interruption, Level};
use chrono::{DateTime, Utc};

/// One interruption after quota evaluation, with the quota state observed
/// at decision time (only Notify/Urgent carry a snapshot).
#[derive(Clone, Debug)]
pub struct QuotaOutcome {
    pub interruption: Interruption,
    pub snapshot: Option<QuotaSnapshot>,
}

/// Output of one quota pass.
#[derive(Clone, Debug, Default)]
pub struct QuotaReport {
    pub outcomes: Vec<QuotaOutcome>,
    pub downgraded: u32,
}

impl QuotaReport {
    pub fn interruptions(&self) -> Vec<Interruption> {
        self.outcomes.iter().map(|o| o.interruption.clone()).collect()
    }
}

/// Enforces the per-circle daily Notify/Urgent cap.
pub struct QuotaEnforcer;

impl QuotaEnforcer {
    pub fn apply(
        store: &mut dyn QuotaStore,
        policy: &PolicySet,
        interruptions: Vec<Interruption>,
        now: DateTime<Utc>,
    ) -> QuotaReport {
        let day = day_key(now);
        let mut report = QuotaReport::default();

        for mut interruption in interruptions {
            if !interruption.level.counts_against_quota() {
                report.outcomes.push(QuotaOutcome {
                    interruption,
                    snapshot: None,
                });
                continue;
            }

            let limit = policy.circle_or_default(&interruption.circle).daily_notify_quota;
            let used = store.usage(&interruption.circle, &day);
            let original_level = interruption.level;

            if used >= limit {
                match interruption.level {
                    Level::Urgent => {
                        // Quota exhausted: urgent passes untouched, no increment.
                        debug!(
                            interruption = %interruption.id,
                            circle = %interruption.circle,
                            used,
                            limit,
                            "Urgent passes despite exhausted quota"
                        );
                        report.outcomes.push(QuotaOutcome {
                            interruption,
                            snapshot: Some(QuotaSnapshot {
                                used,
                                limit,
                                downgraded: false,
                                original_level,
                            }),
                        });
                    }
                    _ => {
                        interruption.level = Level::Queued;
                        interruption.summary =
                            format!("{} (queued: daily quota reached)", interruption.summary);
                        interruption.recompute_id();
                        report.downgraded += 1;
                        info!(
                            interruption = %interruption.id,
                            circle = %interruption.circle,
                            used,
                            limit,
                            "Notify downgraded to queued by quota"
                        );
                        report.outcomes.push(QuotaOutcome {
                            interruption,
                            snapshot: Some(QuotaSnapshot {
                                used,
                                limit,
                                downgraded: true,
                                original_level,
                            }),
                        });
                    }
                }
            } else {
                store.increment(&interruption.circle, &day);
                report.outcomes.push(QuotaOutcome {
                    interruption,
                    snapshot: Some(QuotaSnapshot {
                        used: used + 1,
                        limit,
                        downgraded: false,
                        original_level,
                    }),
                });
            }
        }

        report
    }
}
