//! Versioned suppression set
//!
//! Rules are kept sorted by (circle, scope, key, createdAt desc); every
//! mutation re-sorts, rehashes, and bumps the version. Queries return the
//! first active rule in sorted order.

use crate::SuppressionRule;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use vigil_hash::sha256_hex;
use vigil_types::SuppressionScope;

/// Versioned collection of suppression rules.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SuppressionSet {
    pub version: u64,
    /// Sorted by (circle, scope, key, created_at desc)
    pub rules: Vec<SuppressionRule>,
    /// Full SHA-256 over the sorted rule canonical strings
    pub hash: String,
}

impl SuppressionSet {
    pub fn new() -> Self {
        let mut set = Self {
            version: 1,
            rules: Vec::new(),
            hash: String::new(),
        };
        set.hash = set.compute_hash();
        set
    }

    /// Add a rule. Duplicate ids are ignored; any accepted mutation
    /// re-sorts, rehashes, and bumps the version.
    pub fn add_rule(&mut self, rule: SuppressionRule) -> bool {
        if self.rules.iter().any(|r| r.id == rule.id) {
            debug!(rule_id = %rule.id, "Suppression rule already present");
            return false;
        }
        info!(
            rule_id = %rule.id,
            circle = %rule.circle,
            scope = rule.scope.canonical_str(),
            key = %rule.key,
            "Suppression rule added"
        );
        self.rules.push(rule);
        self.resort_and_rehash();
        true
    }

    /// Remove a rule by id.
    pub fn remove_rule(&mut self, rule_id: &str) -> bool {
        let before = self.rules.len();
        self.rules.retain(|r| r.id != rule_id);
        if self.rules.len() == before {
            return false;
        }
        info!(rule_id = %rule_id, "Suppression rule removed");
        self.resort_and_rehash();
        true
    }

    /// First active rule (in sorted order) covering the query.
    pub fn find_match(
        &self,
        now: DateTime<Utc>,
        circle: &str,
        scope: SuppressionScope,
        key: &str,
    ) -> Option<&SuppressionRule> {
        self.rules
            .iter()
            .find(|r| r.is_active(now) && r.covers(circle, scope, key))
    }

    /// Whether an active rule already covers (circle, scope, key); used by
    /// the learning engine to avoid duplicate rule creation.
    pub fn has_active(
        &self,
        now: DateTime<Utc>,
        circle: &str,
        scope: SuppressionScope,
        key: &str,
    ) -> bool {
        self.find_match(now, circle, scope, key).is_some()
    }

    /// Remove rules that are no longer active. Bumps the version only when
    /// something was removed. Returns the number removed.
    pub fn prune_expired(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.rules.len();
        self.rules.retain(|r| r.is_active(now) || now < r.created_at);
        let removed = before - self.rules.len();
        if removed > 0 {
            info!(removed, "Expired suppression rules pruned");
            self.resort_and_rehash();
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Hash over sorted rule canonical strings; reproducible because the
    /// sort order is total.
    pub fn compute_hash(&self) -> String {
        let parts: Vec<String> = std::iter::once(format!("suppression_set:v{}", self.version))
            .chain(self.rules.iter().map(|r| r.canonical_string()))
            .collect();
        sha256_hex(&parts.join("|"))
    }

    fn resort_and_rehash(&mut self) {
        self.rules.sort_by(|a, b| {
            a.circle
                .cmp(&b.circle)
                .then(a.scope.canonical_str().cmp(b.scope.canonical_str()))
                .then(a.key.cmp(&b.key))
                .then(b.created_at.cmp(&a.created_at))
        });
        self.version += 1;
        self.hash = self.compute_hash();
    }
}

impl Default for SuppressionSet {
    fn default() -> Self {
        Self::new()
    }
}
