//! # vigil-hash
//!
//! Canonical string construction and SHA-256 hashing. Every identity and
//! audit hash in Vigil is computed over a pipe-delimited canonical string
//! built from an *ordered* field list; never over JSON and never over
//! unordered map iteration. Identical field lists produce identical
//! digests, which is what makes replay bit-exact.
//!
//! Id widths used across the workspace:
//! - record ids (interruption, rule, notification, feedback, plan) and
//!   dedup/digest keys: first 16 hex chars of the digest
//! - set/plan/explain audit hashes: full 64-char hex digest

#![deny(unsafe_code)]

use sha2::{Digest, Sha256};

/// Hex length of record ids and dedup/digest keys.
pub const SHORT_ID_LEN: usize = 16;

/// Join `key:value` pairs with `|` in the given order.
///
/// The caller owns field ordering; this function never sorts.
pub fn canonical_fields(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(k, v)| format!("{}:{}", k, v))
        .collect::<Vec<_>>()
        .join("|")
}

/// Join raw values with `|` in the given order.
pub fn canonical_values(values: &[&str]) -> String {
    values.join("|")
}

/// Full lowercase hex SHA-256 digest of the input string.
pub fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// Truncated digest for record ids. `len` must state the documented width
/// of the field being filled; callers use [`SHORT_ID_LEN`] unless a format
/// says otherwise.
pub fn short_hash(input: &str, len: usize) -> String {
    let mut digest = sha256_hex(input);
    digest.truncate(len);
    digest
}

/// Convenience for the common case: 16-hex record id.
pub fn record_id(input: &str) -> String {
    short_hash(input, SHORT_ID_LEN)
}
