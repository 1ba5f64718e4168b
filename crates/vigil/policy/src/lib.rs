//! # vigil-policy
//!
//! Per-circle behavior knobs and per-trigger biases, bundled into a
//! versioned, copy-on-write `PolicySet`. Mutation happens exclusively
//! through the learning engine, which builds a new version; the classifier
//! and planner consume the set read-only. `PolicySet::version` is the
//! optimistic-concurrency token for callers that persist the set.

#![deny(unsafe_code)]

mod circle;
mod set;
mod trigger;

pub use circle::CirclePolicy;
pub use set::PolicySet;
pub use trigger::TriggerPolicy;
