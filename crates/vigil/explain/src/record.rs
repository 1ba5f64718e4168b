//! Explain record and its component snapshots

use serde::{Deserialize, Serialize};
use vigil_types::Level;

/// How a regret score was assembled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub circle_base: i32,
    pub due_boost: i32,
    pub action_boost: i32,
    pub severity_boost: i32,
    pub trigger_bias: i32,
    /// Clamped final score
    pub final_score: u8,
}

impl ScoreBreakdown {
    pub fn canonical_string(&self) -> String {
        format!(
            "base:{},due:{},action:{},severity:{},bias:{},final:{}",
            self.circle_base,
            self.due_boost,
            self.action_boost,
            self.severity_boost,
            self.trigger_bias,
            self.final_score
        )
    }
}

/// Quota state at the moment the decision was made.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaSnapshot {
    pub used: u32,
    pub limit: u32,
    pub downgraded: bool,
    /// Level before any quota downgrade
    pub original_level: Level,
}

impl QuotaSnapshot {
    pub fn canonical_string(&self) -> String {
        format!(
            "used:{},limit:{},downgraded:{},origin:{}",
            self.used,
            self.limit,
            self.downgraded,
            self.original_level.canonical_str()
        )
    }
}

/// Audit trail for one interruption decision. Built through
/// [`crate::ExplainBuilder`]; the hash covers every field including reason
/// order.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExplainRecord {
    pub interruption_id: String,
    pub regret_score: u8,
    pub level: Level,
    /// Ordered, never re-sorted
    pub reasons: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<ScoreBreakdown>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quota: Option<QuotaSnapshot>,
    /// Id of the suppression rule that hit, if one did
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suppression_hit: Option<String>,
    /// Full SHA-256 of the canonical string
    pub hash: String,
}

impl ExplainRecord {
    /// Hash input. Reason order is preserved verbatim.
    pub fn canonical_string(&self) -> String {
        let breakdown = self
            .breakdown
            .as_ref()
            .map_or("none".to_string(), ScoreBreakdown::canonical_string);
        let quota = self
            .quota
            .as_ref()
            .map_or("none".to_string(), QuotaSnapshot::canonical_string);
        format!(
            "explain|{}|score:{}|level:{}|reasons:[{}]|breakdown:{}|quota:{}|suppression:{}",
            self.interruption_id,
            self.regret_score,
            self.level.canonical_str(),
            self.reasons.join(";"),
            breakdown,
            quota,
            self.suppression_hit.as_deref().unwrap_or("none"),
        )
    }
}
