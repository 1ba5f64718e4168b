//! # vigil-store
//!
//! Store contracts the decision core consumes, plus in-memory reference
//! implementations. Durable implementations are external collaborators.
//!
//! The dedup and quota contracts have no error channel: a durable
//! backing store must not fail these calls. An implementation that
//! cannot guarantee success must fail open (report zero usage, not seen)
//! so a storage outage can over-notify but never silently drop an urgent
//! item.

#![deny(unsafe_code)]

mod clock;
mod dedup;
mod history;
mod quota;

pub use clock::{Clock, FixedClock, SystemClock};
pub use dedup::{DedupStore, MemoryDedupStore};
pub use history::{FeedbackHistory, MemoryFeedbackHistory};
pub use quota::{MemoryQuotaStore, QuotaStore};
