//! Time helpers.
//!
//! All timestamps on the wire are ISO 8601 (RFC 3339) strings in UTC.

use chrono::{DateTime, SecondsFormat, Utc};

/// Current time as Unix milliseconds (UTC).
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Convert Unix milliseconds to an RFC 3339 string.
///
/// Out-of-range values fall back to the Unix epoch.
pub fn millis_to_rfc3339(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}
