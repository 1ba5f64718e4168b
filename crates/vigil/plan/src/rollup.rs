//! Digest rollup
//!
//! Merges repeated interruptions across a window into one line per
//! condition. The digest key deliberately excludes any time bucket so the
//! same condition rolls up across days.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use vigil_hash::{canonical_values, record_id};
use vigil_types::{Interruption, Level};

/// One merged digest entry.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RollupItem {
    /// 16-hex hash of (circle, trigger, source_ref), bucket-free
    pub digest_key: String,
    pub circle: String,
    pub trigger: String,
    /// Highest level seen across occurrences
    pub max_level: Level,
    pub max_regret: u8,
    pub occurrence_count: u32,
    pub first_seen: chrono::DateTime<chrono::Utc>,
    pub last_seen: chrono::DateTime<chrono::Utc>,
    /// Occurrences per level canonical string, key-sorted
    pub level_counts: BTreeMap<String, u32>,
    /// Summary from the most recent occurrence
    pub summary: String,
}

pub fn digest_key(circle: &str, trigger: &str, source_ref: &str) -> String {
    record_id(&canonical_values(&["digest", circle, trigger, source_ref]))
}

/// Merge interruptions into rollup items, one per digest key. Output is
/// sorted by (max level desc, max regret desc, digest key asc); the order
/// the digest body lists them in.
pub fn rollup(interruptions: &[Interruption]) -> Vec<RollupItem> {
    let mut merged: BTreeMap<String, RollupItem> = BTreeMap::new();

    for interruption in interruptions {
        let key = digest_key(
            &interruption.circle,
            interruption.trigger.canonical_str(),
            &interruption.source_event,
        );
        let entry = merged.entry(key.clone()).or_insert_with(|| RollupItem {
            digest_key: key,
            circle: interruption.circle.clone(),
            trigger: interruption.trigger.canonical_str().to_string(),
            max_level: interruption.level,
            max_regret: interruption.regret,
            occurrence_count: 0,
            first_seen: interruption.created_at,
            last_seen: interruption.created_at,
            level_counts: BTreeMap::new(),
            summary: interruption.summary.clone(),
        });
        entry.occurrence_count += 1;
        entry.max_level = entry.max_level.max(interruption.level);
        entry.max_regret = entry.max_regret.max(interruption.regret);
        *entry
            .level_counts
            .entry(interruption.level.canonical_str().to_string())
            .or_insert(0) += 1;
        if interruption.created_at < entry.first_seen {
            entry.first_seen = interruption.created_at;
        }
        if interruption.created_at >= entry.last_seen {
            entry.last_seen = interruption.created_at;
            entry.summary = interruption.summary.clone();
        }
    }

    let mut items: Vec<RollupItem> = merged.into_values().collect();
    items.sort_by(|a, b| {
        b.max_level
            .cmp(&a.max_level)
            .then(b.max_regret.cmp(&a.max_regret))
            .then(a.digest_key.cmp(&b.digest_key))
    });
    items
}
