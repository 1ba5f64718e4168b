//! Ordered-append explain builder

use crate::{ExplainRecord, QuotaSnapshot, ScoreBreakdown};
use vigil_hash::sha256_hex;
use vigil_types::Level;

/// Accumulates an explanation in call order. `build()` computes the record
/// hash; reasons are hashed in the order they were appended.
#[derive(Clone, Debug)]
pub struct ExplainBuilder {
    interruption_id: String,
    regret_score: u8,
    level: Level,
    reasons: Vec<String>,
    breakdown: Option<ScoreBreakdown>,
    quota: Option<QuotaSnapshot>,
    suppression_hit: Option<String>,
}

impl ExplainBuilder {
    pub fn new(interruption_id: impl Into<String>) -> Self {
        Self {
            interruption_id: interruption_id.into(),
            regret_score: 0,
            level: Level::Silent,
            reasons: Vec::new(),
            breakdown: None,
            quota: None,
            suppression_hit: None,
        }
    }

    pub fn score(mut self, score: u8) -> Self {
        self.regret_score = score.min(100);
        self
    }

    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Append one human-readable reason. Order is preserved through the
    /// hash; never sorted.
    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reasons.push(reason.into());
        self
    }

    pub fn reasons<I, S>(mut self, reasons: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reasons.extend(reasons.into_iter().map(Into::into));
        self
    }

    pub fn breakdown(mut self, breakdown: ScoreBreakdown) -> Self {
        self.breakdown = Some(breakdown);
        self
    }

    pub fn quota(mut self, quota: QuotaSnapshot) -> Self {
        self.quota = Some(quota);
        self
    }

    pub fn suppression_hit(mut self, rule_id: impl Into<String>) -> Self {
        self.suppression_hit = Some(rule_id.into());
        self
    }

    /// Finalize and compute the SHA-256 hash of the canonical string.
    pub fn build(self) -> ExplainRecord {
        let mut record = ExplainRecord {
            interruption_id: self.interruption_id,
            regret_score: self.regret_score,
            level: self.level,
            reasons: self.reasons,
            breakdown: self.breakdown,
            quota: self.quota,
            suppression_hit: self.suppression_hit,
            hash: String::new(),
        };
        record.hash = sha256_hex(&record.canonical_string());
        record
    }
}
