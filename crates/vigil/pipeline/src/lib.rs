//! # vigil-pipeline
//!
//! Orchestrates one circle partition's decision loop: obligations in,
//! a notification plan and explain records out, and feedback back in to
//! produce the next policy/suppression version. Everything is synchronous
//! and pure given the owned stores; callers serialize runs per circle;
//! there is no internal locking.

#![deny(unsafe_code)]

mod cycle;

pub use cycle::{Cycle, CycleReport, LearnReport};
