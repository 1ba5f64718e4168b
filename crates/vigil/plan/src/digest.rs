//! Digest email composition
//!
//! Turns rollup items into one subject/body pair per circle. Skips are
//! explicit and carry a reason so the caller can audit why no digest went
//! out.

use crate::{DeliveryPrefs, RollupItem};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use vigil_types::Level;

const DIGEST_TOP_N: usize = 5;

/// A composed digest email.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigestEmail {
    pub circle: String,
    pub subject: String,
    pub body: String,
    pub item_count: usize,
    pub planned_at: DateTime<Utc>,
}

/// Outcome of digest planning for one circle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DigestPlan {
    Planned(DigestEmail),
    Skipped { reason: String },
}

impl DigestPlan {
    fn skipped(reason: &str) -> Self {
        DigestPlan::Skipped {
            reason: reason.to_string(),
        }
    }

    pub fn email(&self) -> Option<&DigestEmail> {
        match self {
            DigestPlan::Planned(email) => Some(email),
            DigestPlan::Skipped { .. } => None,
        }
    }
}

/// Compose the digest for one circle from already-rolled-up items. Items
/// are expected in rollup order (level desc, regret desc); the body lists
/// the top five.
pub fn plan_digest(
    circle: &str,
    items: &[RollupItem],
    prefs: &DeliveryPrefs,
    now: DateTime<Utc>,
) -> DigestPlan {
    let circle_prefs = prefs.circle_or_default(circle);
    if !circle_prefs.digest_enabled {
        debug!(circle, "Digest disabled");
        return DigestPlan::skipped("digest disabled");
    }
    if !circle_prefs.digest_send_allowed {
        debug!(circle, "Digest send not allowed");
        return DigestPlan::skipped("digest send not allowed");
    }
    if items.is_empty() {
        return DigestPlan::skipped("no items");
    }

    let urgent_count = items
        .iter()
        .filter(|i| i.max_level == Level::Urgent)
        .count();
    let subject = if urgent_count > 0 {
        format!(
            "{} digest: {} items ({} urgent)",
            circle,
            items.len(),
            urgent_count
        )
    } else {
        format!("{} digest: {} items", circle, items.len())
    };

    let body = items
        .iter()
        .take(DIGEST_TOP_N)
        .map(|item| {
            if item.occurrence_count > 1 {
                format!(
                    "{} {} x{}",
                    item.max_level.icon(),
                    item.summary,
                    item.occurrence_count
                )
            } else {
                format!("{} {}", item.max_level.icon(), item.summary)
            }
        })
        .collect::<Vec<_>>()
        .join("\n");

    DigestPlan::Planned(DigestEmail {
        circle: circle.to_string(),
        subject,
        body,
        item_count: items.len(),
        planned_at: now,
    })
}
