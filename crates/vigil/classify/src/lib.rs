//! # vigil-classify
//!
//! The front half of the decision loop: obligations become scored, leveled
//! interruptions; repeats are dropped inside their time bucket; Notify and
//! Urgent surfacing is capped per circle per day.
//!
//! Order matters and is fixed: classify → dedup → quota. Dedup must run
//! before quota so a dropped repeat never consumes quota budget.

#![deny(unsafe_code)]

mod classifier;
mod config;
mod dedup;
mod quota;

pub use classifier::{Classification, Classifier};
pub use config::ClassifierConfig;
pub use dedup::Deduplicator;
pub use quota::{QuotaEnforcer, QuotaOutcome, QuotaReport};
