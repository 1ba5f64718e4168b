//! Feedback history lookup contract
//!
//! Append-only; `put` is gated on record validation, which is the only
//! typed-error surface in the store layer.

use chrono::{DateTime, Utc};
use vigil_types::{FeedbackRecord, Signal, ValidationResult};

/// History of feedback records consulted by the learning engine.
pub trait FeedbackHistory {
    /// Unnecessary-signal records for (circle, trigger) captured at or
    /// after `since`, oldest first.
    fn recent_unnecessary(
        &self,
        circle: &str,
        trigger: &str,
        since: DateTime<Utc>,
    ) -> Vec<FeedbackRecord>;

    /// Append a record. Fails only record-level validation, never storage.
    fn put(&mut self, record: FeedbackRecord) -> ValidationResult;
}

/// In-memory reference implementation. Trigger association comes from the
/// feedback context captured alongside the record.
#[derive(Clone, Debug, Default)]
pub struct MemoryFeedbackHistory {
    records: Vec<(FeedbackRecord, Option<String>)>,
}

impl MemoryFeedbackHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append with the trigger the feedback was about, when known.
    pub fn put_with_trigger(
        &mut self,
        record: FeedbackRecord,
        trigger: Option<String>,
    ) -> ValidationResult {
        record.validate()?;
        self.records.push((record, trigger));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FeedbackHistory for MemoryFeedbackHistory {
    fn recent_unnecessary(
        &self,
        circle: &str,
        trigger: &str,
        since: DateTime<Utc>,
    ) -> Vec<FeedbackRecord> {
        self.records
            .iter()
            .filter(|(r, t)| {
                r.signal == Signal::Unnecessary
                    && r.circle == circle
                    && t.as_deref() == Some(trigger)
                    && r.captured_at >= since
            })
            .map(|(r, _)| r.clone())
            .collect()
    }

    fn put(&mut self, record: FeedbackRecord) -> ValidationResult {
        self.put_with_trigger(record, None)
    }
}
