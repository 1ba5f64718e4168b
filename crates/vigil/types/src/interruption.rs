//! Interruptions: scored, leveled candidates to surface
//!
//! An interruption's id is a pure function of its fields plus creation
//! time. It is recomputed every cycle and never persisted directly; only
//! dedup and quota counters persist across cycles.

use crate::{unix, Level, Trigger};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use vigil_hash::{canonical_fields, record_id};

/// A scored, leveled candidate to surface to the user.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Interruption {
    /// 16-hex truncated SHA-256 of the canonical string
    pub id: String,
    pub circle: String,
    pub trigger: Trigger,
    pub level: Level,
    /// Regret score, clamped 0..=100
    pub regret: u8,
    /// Confidence, clamped 0..=100
    pub confidence: u8,
    /// Source event reference carried from the obligation
    pub source_event: String,
    /// Originating obligation id
    pub obligation_id: String,
    pub summary: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    /// Bucketed identity used by the deduplicator
    pub dedup_key: String,
    /// Intersection context for audience resolution
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intersection_id: Option<String>,
}

impl Interruption {
    /// Construct and assign the hash id. `dedup_key` is computed by the
    /// classifier since its bucket granularity depends on the level.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        circle: impl Into<String>,
        trigger: Trigger,
        level: Level,
        regret: u8,
        confidence: u8,
        source_event: impl Into<String>,
        obligation_id: impl Into<String>,
        summary: impl Into<String>,
        expires_at: DateTime<Utc>,
        created_at: DateTime<Utc>,
        dedup_key: String,
    ) -> Self {
        let mut interruption = Self {
            id: String::new(),
            circle: circle.into(),
            trigger,
            level,
            regret: regret.min(100),
            confidence: confidence.min(100),
            source_event: source_event.into(),
            obligation_id: obligation_id.into(),
            summary: summary.into(),
            expires_at,
            created_at,
            dedup_key,
            intersection_id: None,
        };
        interruption.recompute_id();
        interruption
    }

    pub fn with_intersection(mut self, intersection_id: impl Into<String>) -> Self {
        self.intersection_id = Some(intersection_id.into());
        self
    }

    /// The pipe-delimited hash input. Field order is part of the contract.
    pub fn canonical_string(&self) -> String {
        canonical_fields(&[
            ("circle", &self.circle),
            ("trigger", self.trigger.canonical_str()),
            ("level", self.level.canonical_str()),
            ("source_event", &self.source_event),
            ("obligation", &self.obligation_id),
            ("regret", &self.regret.to_string()),
            ("confidence", &self.confidence.to_string()),
            ("expires", &unix(self.expires_at).to_string()),
            ("created", &unix(self.created_at).to_string()),
            ("summary", &self.summary),
        ])
    }

    /// Recompute the id from the canonical string. Must be called after any
    /// mutation of a canonical field (e.g. a quota downgrade changing level
    /// and summary).
    pub fn recompute_id(&mut self) {
        self.id = record_id(&self.canonical_string());
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Deterministic surfacing order: level then regret descending, then
    /// creation time and id as total tie-breakers.
    pub fn sort_cycle(interruptions: &mut [Interruption]) {
        interruptions.sort_by(|a, b| {
            b.level
                .cmp(&a.level)
                .then(b.regret.cmp(&a.regret))
                .then(a.created_at.cmp(&b.created_at))
                .then(a.id.cmp(&b.id))
        });
    }
}
