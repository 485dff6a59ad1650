//! Time and timestamp utilities

use chrono::{SecondsFormat, Utc};

/// Get current Unix timestamp in seconds
pub fn current_timestamp() -> i64 {
    Utc::now().timestamp()
}

/// Current UTC time as RFC 3339 with millisecond precision.
///
/// Lexicographic order of these strings matches chronological order,
/// which the store relies on for "most recent" lookups.
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
