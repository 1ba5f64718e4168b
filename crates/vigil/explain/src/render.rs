//! Fixed-layout text rendering of explain records
//!
//! Display-only; the hash is computed over the canonical string, never
//! over this output.

use crate::ExplainRecord;
use std::fmt::Write;

/// Render a record as a fixed-layout human-readable block.
pub fn render(record: &ExplainRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "why: interruption {}", record.interruption_id);
    let _ = writeln!(out, "  score: {}", record.regret_score);
    let _ = writeln!(out, "  level: {}", record.level.canonical_str());

    let _ = writeln!(out, "  reasons:");
    for (i, reason) in record.reasons.iter().enumerate() {
        let _ = writeln!(out, "    {}. {}", i + 1, reason);
    }

    if let Some(b) = &record.breakdown {
        let _ = writeln!(out, "  breakdown:");
        let _ = writeln!(out, "    circle base    {:+}", b.circle_base);
        let _ = writeln!(out, "    due boost      {:+}", b.due_boost);
        let _ = writeln!(out, "    action boost   {:+}", b.action_boost);
        let _ = writeln!(out, "    severity boost {:+}", b.severity_boost);
        let _ = writeln!(out, "    trigger bias   {:+}", b.trigger_bias);
        let _ = writeln!(out, "    final score    {}", b.final_score);
    }

    if let Some(q) = &record.quota {
        let _ = writeln!(
            out,
            "  quota: {} of {} used{}",
            q.used,
            q.limit,
            if q.downgraded {
                format!(" (downgraded from {})", q.original_level.canonical_str())
            } else {
                String::new()
            }
        );
    }

    if let Some(rule) = &record.suppression_hit {
        let _ = writeln!(out, "  suppressed by: {}", rule);
    }

    let _ = writeln!(out, "  hash: {}", record.hash);
    out
}
