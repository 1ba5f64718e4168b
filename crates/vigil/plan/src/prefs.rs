//! Delivery preferences
//!
//! Planner configuration, distinct from the learned `PolicySet`: channel
//! tables per level, quiet windows, per-channel daily limits, digest flags,
//! and the intersection audience rules used to resolve recipients. The
//! learning engine never touches these.

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use vigil_types::{Audience, Channel, Level};

/// A daily quiet window in UTC hours. `start == end` means disabled;
/// `start > end` crosses midnight.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct QuietWindow {
    pub start_hour: u32,
    pub end_hour: u32,
    /// Channel used inside the window
    pub channel: Channel,
    /// Urgent keeps its channel inside the window
    pub allow_urgent: bool,
}

impl QuietWindow {
    pub fn contains(&self, now: DateTime<Utc>) -> bool {
        if self.start_hour == self.end_hour {
            return false;
        }
        let hour = now.hour();
        if self.start_hour < self.end_hour {
            hour >= self.start_hour && hour < self.end_hour
        } else {
            hour >= self.start_hour || hour < self.end_hour
        }
    }
}

/// Audience rule for one intersection: who belongs to it and which audience
/// its notifications default to.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IntersectionRule {
    pub audience: Audience,
    pub owner: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spouse: Option<String>,
    /// Full membership, owner and spouse included
    pub members: Vec<String>,
}

impl IntersectionRule {
    /// Concrete person ids for the rule's audience. Falls back to the owner
    /// when the audience names people the intersection does not have.
    pub fn resolve(&self) -> Vec<String> {
        let persons = match self.audience {
            Audience::OwnerOnly => vec![self.owner.clone()],
            Audience::SpouseOnly => self.spouse.iter().cloned().collect(),
            Audience::Both => {
                let mut p = vec![self.owner.clone()];
                p.extend(self.spouse.iter().cloned());
                p
            }
            Audience::AllMembers => self.members.clone(),
        };
        if persons.is_empty() {
            vec![self.owner.clone()]
        } else {
            persons
        }
    }
}

/// Per-circle delivery knobs.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CirclePrefs {
    pub circle: String,
    /// Owner person id, the default recipient
    pub owner: String,
    /// Channels usable at Urgent, most intrusive first by convention
    pub urgent_channels: Vec<Channel>,
    pub notify_channels: Vec<Channel>,
    pub queued_channels: Vec<Channel>,
    pub ambient_channels: Vec<Channel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiet: Option<QuietWindow>,
    /// Daily per-channel caps, keyed by channel canonical string. Absent
    /// channels are uncapped.
    pub channel_limits: BTreeMap<String, u32>,
    pub digest_enabled: bool,
    pub digest_send_allowed: bool,
}

impl CirclePrefs {
    pub fn new(circle: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            circle: circle.into(),
            owner: owner.into(),
            urgent_channels: vec![Channel::Sms, Channel::Push],
            notify_channels: vec![Channel::Push, Channel::EmailAlert],
            queued_channels: vec![Channel::EmailDigest, Channel::WebBadge],
            ambient_channels: vec![Channel::WebBadge],
            quiet: None,
            channel_limits: BTreeMap::new(),
            digest_enabled: true,
            digest_send_allowed: true,
        }
    }

    pub fn with_quiet(mut self, quiet: QuietWindow) -> Self {
        self.quiet = Some(quiet);
        self
    }

    pub fn with_channel_limit(mut self, channel: Channel, limit: u32) -> Self {
        self.channel_limits
            .insert(channel.canonical_str().to_string(), limit);
        self
    }

    pub fn with_digest(mut self, enabled: bool, send_allowed: bool) -> Self {
        self.digest_enabled = enabled;
        self.digest_send_allowed = send_allowed;
        self
    }

    /// Most intrusive channel configured for a level. Silent has no
    /// channels by definition; an empty table falls back to the web badge.
    pub fn channel_for(&self, level: Level) -> Option<Channel> {
        let table = match level {
            Level::Silent => return None,
            Level::Ambient => &self.ambient_channels,
            Level::Queued => &self.queued_channels,
            Level::Notify => &self.notify_channels,
            Level::Urgent => &self.urgent_channels,
        };
        Some(
            table
                .iter()
                .copied()
                .max_by_key(Channel::intrusiveness)
                .unwrap_or(Channel::WebBadge),
        )
    }

    pub fn channel_limit(&self, channel: Channel) -> Option<u32> {
        self.channel_limits.get(channel.canonical_str()).copied()
    }
}

/// Full delivery configuration: one prefs entry per circle plus the
/// intersection audience rules.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DeliveryPrefs {
    pub circles: BTreeMap<String, CirclePrefs>,
    pub intersections: BTreeMap<String, IntersectionRule>,
}

impl DeliveryPrefs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_circle(mut self, prefs: CirclePrefs) -> Self {
        self.circles.insert(prefs.circle.clone(), prefs);
        self
    }

    pub fn with_intersection(mut self, id: impl Into<String>, rule: IntersectionRule) -> Self {
        self.intersections.insert(id.into(), rule);
        self
    }

    /// Prefs for a circle, defaulting for circles never configured.
    pub fn circle_or_default(&self, circle: &str) -> CirclePrefs {
        self.circles
            .get(circle)
            .cloned()
            .unwrap_or_else(|| CirclePrefs::new(circle, "owner"))
    }

    pub fn intersection(&self, id: &str) -> Option<&IntersectionRule> {
        self.intersections.get(id)
    }
}
