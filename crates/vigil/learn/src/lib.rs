//! # vigil-learn
//!
//! Rule-based preference learning: feedback in, a new policy version and
//! candidate suppression rules out, with a byte-reproducible decision log.
//! No randomness, no ML; identical inputs always produce identical
//! outputs. New suppression rules are returned, never inserted; the caller
//! owns the live set.

#![deny(unsafe_code)]

mod config;
mod decision;
mod engine;

pub use config::LearnConfig;
pub use decision::{DecisionAction, DecisionRecord};
pub use engine::{apply_feedback, LearnError, LearnOutcome};
