//! # vigil-plan
//!
//! The back half of the surfacing path: leveled interruptions become
//! channel-planned notifications. Channel choice starts from the most
//! intrusive channel configured for the level and only moves downward;
//! quiet hours and per-channel daily quotas downgrade, never upgrade.
//! The rollup merges repeats across a longer window into digest lines.

#![deny(unsafe_code)]

mod digest;
mod planner;
mod prefs;
mod rollup;

pub use digest::{plan_digest, DigestEmail, DigestPlan};
pub use planner::{PlanReport, Planner, SkipReason, SkippedInterruption};
pub use prefs::{CirclePrefs, DeliveryPrefs, IntersectionRule, QuietWindow};
pub use rollup::{rollup, RollupItem};
