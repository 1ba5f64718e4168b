//! # vigil-explain
//!
//! Deterministic "why" records for interruption decisions. The builder is
//! an ordered-append structure: reasons keep their call order verbatim,
//! and that order is part of the record hash; a reordered explanation is
//! a different explanation.

#![deny(unsafe_code)]

mod builder;
mod record;
mod render;

pub use builder::ExplainBuilder;
pub use record::{ExplainRecord, QuotaSnapshot, ScoreBreakdown};
pub use render::render;
