//! Suppression rules
//!
//! A rule's id is a pure function of (circle, scope, key, createdAt,
//! expiresAt, source); two rules built from identical arguments are the
//! same rule.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use vigil_hash::{canonical_fields, canonical_values, record_id};
use vigil_types::{
    rfc3339, SuppressionScope, SuppressionSource, ValidationError, ValidationResult,
};

/// A scoped directive to withhold surfacing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuppressionRule {
    /// 16-hex hash of (circle, scope, key, created, expires, source)
    pub id: String,
    /// Circle name or `*` for all circles
    pub circle: String,
    pub scope: SuppressionScope,
    /// Scope-specific key (person id, vendor id, trigger, item key) or `*`
    pub key: String,
    pub created_at: DateTime<Utc>,
    /// `None` means permanent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    pub reason: String,
    pub source: SuppressionSource,
}

impl SuppressionRule {
    pub fn new(
        circle: impl Into<String>,
        scope: SuppressionScope,
        key: impl Into<String>,
        created_at: DateTime<Utc>,
        expires_at: Option<DateTime<Utc>>,
        reason: impl Into<String>,
        source: SuppressionSource,
    ) -> Self {
        let circle = circle.into();
        let key = key.into();
        let id = record_id(&canonical_values(&[
            "suppress",
            &circle,
            scope.canonical_str(),
            &key,
            &rfc3339(created_at),
            &Self::expires_str(expires_at),
            source.canonical_str(),
        ]));
        Self {
            id,
            circle,
            scope,
            key,
            created_at,
            expires_at,
            reason: reason.into(),
            source,
        }
    }

    fn expires_str(expires_at: Option<DateTime<Utc>>) -> String {
        match expires_at {
            Some(ts) => rfc3339(ts),
            None => "permanent".to_string(),
        }
    }

    /// Active iff createdAt ≤ now < expiresAt (or no expiry).
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        if now < self.created_at {
            return false;
        }
        match self.expires_at {
            Some(expiry) => now < expiry,
            None => true,
        }
    }

    /// Whether this rule covers the given (circle, scope, key) query.
    /// Circle and key honor the `*` wildcard; scope matches exactly.
    pub fn covers(&self, circle: &str, scope: SuppressionScope, key: &str) -> bool {
        (self.circle == "*" || self.circle == circle)
            && self.scope == scope
            && (self.key == "*" || self.key == key)
    }

    pub fn canonical_string(&self) -> String {
        canonical_fields(&[
            ("rule_id", &self.id),
            ("circle", &self.circle),
            ("scope", self.scope.canonical_str()),
            ("key", &self.key),
            ("created", &rfc3339(self.created_at)),
            ("expires", &Self::expires_str(self.expires_at)),
            ("reason", &self.reason),
            ("source", self.source.canonical_str()),
        ])
    }

    pub fn validate(&self) -> ValidationResult {
        if self.id.is_empty() {
            return Err(ValidationError::MissingId("suppression_rule"));
        }
        if self.circle.is_empty() {
            return Err(ValidationError::MissingField {
                record: "suppression_rule",
                field: "circle",
            });
        }
        if self.key.is_empty() {
            return Err(ValidationError::MissingField {
                record: "suppression_rule",
                field: "key",
            });
        }
        Ok(())
    }
}
