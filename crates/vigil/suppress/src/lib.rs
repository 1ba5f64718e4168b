//! # vigil-suppress
//!
//! Scoped "do not surface" directives. Rules are value records with hash
//! identity; the set is versioned and keeps its rules sorted so the set
//! hash is reproducible. Matching is first-active-rule in sorted order,
//! with `*` wildcards for circle and key.

#![deny(unsafe_code)]

mod rule;
mod set;

pub use rule::SuppressionRule;
pub use set::SuppressionSet;
