//! Injected clock
//!
//! No decision component reads wall-clock time directly; everything takes
//! `now` from a `Clock` so replays are exact.

use chrono::{DateTime, Utc};

/// Time source injected into the pipeline.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time, for harnesses and binaries only.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Fixed time source for tests and replays.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
