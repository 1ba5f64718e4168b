//! Timestamp formatting helpers shared by every canonical string
//!
//! All hash inputs use one of these formats. Sub-second precision is
//! deliberately dropped so that a replayed timestamp round-trips.

use chrono::{DateTime, SecondsFormat, Utc};

/// RFC 3339 with second precision and a `Z` suffix.
pub fn rfc3339(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Unix seconds.
pub fn unix(ts: DateTime<Utc>) -> i64 {
    ts.timestamp()
}

/// Day-granularity bucket key, UTC.
pub fn day_key(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d").to_string()
}

/// Hour-granularity bucket key, UTC.
pub fn hour_key(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d-%H").to_string()
}
