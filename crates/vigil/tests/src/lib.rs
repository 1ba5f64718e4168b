//! Cross-crate test suite for the decision loop.
//!
//! All tests live under `tests/`; this library is intentionally empty.
