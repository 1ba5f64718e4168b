//! Closed enums with total canonical-string mappings
//!
//! Canonical strings are hash input; changing one changes every derived id,
//! so they are part of the wire contract, not a display concern.

use serde::{Deserialize, Serialize};

/// Surfacing intensity, a total order. Variant order is the ordering
/// used for sorting and quota checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    Silent,
    Ambient,
    Queued,
    Notify,
    Urgent,
}

impl Level {
    pub fn canonical_str(&self) -> &'static str {
        match self {
            Level::Silent => "silent",
            Level::Ambient => "ambient",
            Level::Queued => "queued",
            Level::Notify => "notify",
            Level::Urgent => "urgent",
        }
    }

    /// Icon used in digest rendering.
    pub fn icon(&self) -> &'static str {
        match self {
            Level::Silent => "·",
            Level::Ambient => "○",
            Level::Queued => "◆",
            Level::Notify => "●",
            Level::Urgent => "‼",
        }
    }

    /// Levels that count against the per-circle daily quota.
    pub fn counts_against_quota(&self) -> bool {
        matches!(self, Level::Notify | Level::Urgent)
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.canonical_str())
    }
}

/// Severity of the underlying obligation as reported by the extractor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn canonical_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

/// What kind of action the obligation asks of the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObligationKind {
    Reply,
    Pay,
    Decide,
    Review,
    Renew,
    Attend,
}

impl ObligationKind {
    pub fn canonical_str(&self) -> &'static str {
        match self {
            ObligationKind::Reply => "reply",
            ObligationKind::Pay => "pay",
            ObligationKind::Decide => "decide",
            ObligationKind::Review => "review",
            ObligationKind::Renew => "renew",
            ObligationKind::Attend => "attend",
        }
    }

    /// Kinds that demand a concrete user action soon.
    pub fn needs_action(&self) -> bool {
        matches!(
            self,
            ObligationKind::Reply | ObligationKind::Pay | ObligationKind::Decide
        )
    }
}

/// Where the obligation was extracted from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceType {
    Email,
    Calendar,
    Finance,
    Commerce,
    Manual,
}

impl SourceType {
    pub fn canonical_str(&self) -> &'static str {
        match self {
            SourceType::Email => "email",
            SourceType::Calendar => "calendar",
            SourceType::Finance => "finance",
            SourceType::Commerce => "commerce",
            SourceType::Manual => "manual",
        }
    }
}

/// The reason an interruption surfaces. Derived from obligation kind and
/// source; commerce sources map onto commerce-specific triggers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trigger {
    ReplyNeeded,
    PaymentDue,
    DecisionNeeded,
    ReviewDue,
    RenewalDue,
    EventUpcoming,
    OrderUpdate,
    SubscriptionRenewal,
}

impl Trigger {
    /// Derive the trigger for an obligation.
    pub fn derive(kind: ObligationKind, source: SourceType) -> Self {
        if source == SourceType::Commerce {
            return match kind {
                ObligationKind::Pay | ObligationKind::Renew => Trigger::SubscriptionRenewal,
                _ => Trigger::OrderUpdate,
            };
        }
        match kind {
            ObligationKind::Reply => Trigger::ReplyNeeded,
            ObligationKind::Pay => Trigger::PaymentDue,
            ObligationKind::Decide => Trigger::DecisionNeeded,
            ObligationKind::Review => Trigger::ReviewDue,
            ObligationKind::Renew => Trigger::RenewalDue,
            ObligationKind::Attend => Trigger::EventUpcoming,
        }
    }

    pub fn canonical_str(&self) -> &'static str {
        match self {
            Trigger::ReplyNeeded => "reply_needed",
            Trigger::PaymentDue => "payment_due",
            Trigger::DecisionNeeded => "decision_needed",
            Trigger::ReviewDue => "review_due",
            Trigger::RenewalDue => "renewal_due",
            Trigger::EventUpcoming => "event_upcoming",
            Trigger::OrderUpdate => "order_update",
            Trigger::SubscriptionRenewal => "subscription_renewal",
        }
    }
}

impl std::fmt::Display for Trigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.canonical_str())
    }
}

/// Outbound delivery channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    Sms,
    Push,
    EmailAlert,
    EmailDigest,
    WebBadge,
}

impl Channel {
    pub fn canonical_str(&self) -> &'static str {
        match self {
            Channel::Sms => "sms",
            Channel::Push => "push",
            Channel::EmailAlert => "email_alert",
            Channel::EmailDigest => "email_digest",
            Channel::WebBadge => "web_badge",
        }
    }

    /// Intrusiveness rank; higher interrupts harder. The planner picks the
    /// highest-ranked channel configured for a level.
    pub fn intrusiveness(&self) -> u8 {
        match self {
            Channel::Sms => 5,
            Channel::Push => 4,
            Channel::EmailAlert => 3,
            Channel::EmailDigest => 2,
            Channel::WebBadge => 1,
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.canonical_str())
    }
}

/// Scope a suppression rule applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SuppressionScope {
    Circle,
    Person,
    Vendor,
    Trigger,
    ItemKey,
}

impl SuppressionScope {
    pub fn canonical_str(&self) -> &'static str {
        match self {
            SuppressionScope::Circle => "circle",
            SuppressionScope::Person => "person",
            SuppressionScope::Vendor => "vendor",
            SuppressionScope::Trigger => "trigger",
            SuppressionScope::ItemKey => "itemkey",
        }
    }
}

/// How a suppression rule came to exist.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SuppressionSource {
    Feedback,
    Manual,
    System,
}

impl SuppressionSource {
    pub fn canonical_str(&self) -> &'static str {
        match self {
            SuppressionSource::Feedback => "feedback",
            SuppressionSource::Manual => "manual",
            SuppressionSource::System => "system",
        }
    }
}

/// User signal about a surfaced item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    Helpful,
    Unnecessary,
}

impl Signal {
    pub fn canonical_str(&self) -> &'static str {
        match self {
            Signal::Helpful => "helpful",
            Signal::Unnecessary => "unnecessary",
        }
    }
}

/// What a feedback record targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedbackTarget {
    Interruption,
    Draft,
}

impl FeedbackTarget {
    pub fn canonical_str(&self) -> &'static str {
        match self {
            FeedbackTarget::Interruption => "interruption",
            FeedbackTarget::Draft => "draft",
        }
    }
}

/// Who a notification is delivered to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Audience {
    #[default]
    OwnerOnly,
    SpouseOnly,
    Both,
    AllMembers,
}

impl Audience {
    pub fn canonical_str(&self) -> &'static str {
        match self {
            Audience::OwnerOnly => "owner_only",
            Audience::SpouseOnly => "spouse_only",
            Audience::Both => "both",
            Audience::AllMembers => "all_members",
        }
    }
}

/// Delivery state of a planned notification. The executor that moves these
/// past `Planned` is an external collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum NotificationStatus {
    #[default]
    Planned,
    Sent,
    Cancelled,
}

impl NotificationStatus {
    pub fn canonical_str(&self) -> &'static str {
        match self {
            NotificationStatus::Planned => "planned",
            NotificationStatus::Sent => "sent",
            NotificationStatus::Cancelled => "cancelled",
        }
    }
}
