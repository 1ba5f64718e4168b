//! Notifications and plans: outbound-channel decisions
//!
//! A notification keeps both the originally selected channel and the final
//! one so quiet-hours and quota downgrades stay auditable. The plan hash is
//! order-independent: built from sorted notification ids.

use crate::{unix, Audience, Channel, Level, NotificationStatus, Trigger};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use vigil_hash::{canonical_fields, record_id, sha256_hex};

/// An outbound-channel decision for one interruption.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Notification {
    /// 16-hex hash of the canonical string
    pub id: String,
    pub interruption_id: String,
    pub circle: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intersection_id: Option<String>,
    pub level: Level,
    /// Final channel after any downgrade
    pub channel: Channel,
    /// Channel selected before quiet-hours / quota downgrades
    pub original_channel: Channel,
    pub trigger: Trigger,
    pub audience: Audience,
    /// Concrete recipients, kept sorted
    pub persons: Vec<String>,
    pub summary: String,
    pub planned_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub status: NotificationStatus,
    /// Why the channel was downgraded, if it was
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suppression_reason: Option<String>,
    /// Carried from the interruption for executor-side dedup
    pub dedup_key: String,
}

impl Notification {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        interruption_id: impl Into<String>,
        circle: impl Into<String>,
        intersection_id: Option<String>,
        level: Level,
        channel: Channel,
        trigger: Trigger,
        audience: Audience,
        mut persons: Vec<String>,
        summary: impl Into<String>,
        planned_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
        dedup_key: String,
    ) -> Self {
        persons.sort();
        let mut notification = Self {
            id: String::new(),
            interruption_id: interruption_id.into(),
            circle: circle.into(),
            intersection_id,
            level,
            channel,
            original_channel: channel,
            trigger,
            audience,
            persons,
            summary: summary.into(),
            planned_at,
            expires_at,
            status: NotificationStatus::Planned,
            suppression_reason: None,
            dedup_key,
        };
        notification.recompute_id();
        notification
    }

    /// Downgrade the delivery channel, recording why. The original channel
    /// is retained for audit and the id recomputed.
    pub fn downgrade(&mut self, channel: Channel, reason: impl Into<String>) {
        self.channel = channel;
        self.suppression_reason = Some(reason.into());
        self.recompute_id();
    }

    /// The pipe-delimited hash input, persons sorted and comma-joined.
    pub fn canonical_string(&self) -> String {
        let persons = format!("[{}]", self.persons.join(","));
        canonical_fields(&[
            ("interruption", &self.interruption_id),
            ("circle", &self.circle),
            ("intersection", self.intersection_id.as_deref().unwrap_or("none")),
            ("level", self.level.canonical_str()),
            ("channel", self.channel.canonical_str()),
            ("original_channel", self.original_channel.canonical_str()),
            ("trigger", self.trigger.canonical_str()),
            ("audience", self.audience.canonical_str()),
            ("summary", &self.summary),
            ("planned", &unix(self.planned_at).to_string()),
            ("expires", &unix(self.expires_at).to_string()),
            ("status", self.status.canonical_str()),
            ("suppression", self.suppression_reason.as_deref().unwrap_or("none")),
            ("persons", &persons),
        ])
    }

    pub fn recompute_id(&mut self) {
        self.id = record_id(&self.canonical_string());
    }

    pub fn was_downgraded(&self) -> bool {
        self.channel != self.original_channel
    }
}

/// A batch of notifications for one planning pass.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NotificationPlan {
    pub created_at: Option<DateTime<Utc>>,
    pub notifications: Vec<Notification>,
}

impl NotificationPlan {
    pub fn new(created_at: DateTime<Utc>) -> Self {
        Self {
            created_at: Some(created_at),
            notifications: Vec::new(),
        }
    }

    pub fn add(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    fn sorted_id_join(&self) -> String {
        let mut ids: Vec<&str> = self.notifications.iter().map(|n| n.id.as_str()).collect();
        ids.sort_unstable();
        ids.join("|")
    }

    /// 16-hex plan id over sorted notification ids; identical regardless of
    /// insertion order.
    pub fn plan_id(&self) -> String {
        record_id(&self.sorted_id_join())
    }

    /// Full audit hash over sorted notification ids.
    pub fn hash(&self) -> String {
        sha256_hex(&self.sorted_id_join())
    }
}
