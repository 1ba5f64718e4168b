//! Vigil Domain Types
//!
//! This crate defines the value types that flow through the attention
//! governance pipeline: obligations coming in from extractors,
//! interruptions scored out of them, notifications planned for delivery,
//! and feedback records closing the loop.
//!
//! # Key Concepts
//!
//! - **Closed enums**: every enum (Level, Trigger, Channel, ...) carries a
//!   total `canonical_str()` mapping; exhaustive matches replace runtime
//!   default-case validation.
//! - **Hash identity**: record ids are SHA-256 truncations of canonical
//!   pipe-delimited strings. Identical fields always produce identical ids.
//! - **Immutability**: obligations and feedback records are immutable once
//!   produced; an interruption that changes level recomputes its id.
//!
//! This is a pure types crate with no runtime dependencies. All types
//! implement `Clone`, `Debug`, `Serialize`, `Deserialize`.

#![deny(unsafe_code)]

mod enums;
mod errors;
mod feedback;
mod interruption;
mod notification;
mod obligation;
mod time;

pub use enums::*;
pub use errors::*;
pub use feedback::*;
pub use interruption::*;
pub use notification::*;
pub use obligation::*;
pub use time::*;
