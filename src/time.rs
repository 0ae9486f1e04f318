// Wall-clock helpers for case timing

use chrono::Utc;

/// Milliseconds since the Unix epoch, the unit used for case `start` and `end`.
pub fn now_unix_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Current time as RFC 3339, used in log output.
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339()
}
