//! Time helpers. All timestamps are rendered in JST.

use chrono::{DateTime, FixedOffset, Utc};

/// JST is UTC+9
const JST_OFFSET_SECS: i32 = 9 * 3600;

fn jst() -> FixedOffset {
    FixedOffset::east_opt(JST_OFFSET_SECS).expect("UTC+9 is a valid offset")
}

/// Current time in JST.
pub fn now_jst() -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&jst())
}

/// Get current Unix timestamp in JST (milliseconds)
pub fn get_jst_timestamp() -> i64 {
    now_jst().timestamp_millis()
}

/// Convert a Unix timestamp (milliseconds) to an RFC 3339 string in JST.
///
/// Out of range timestamps fall back to the Unix epoch.
pub fn timestamp_to_jst_rfc3339(timestamp_millis: i64) -> String {
    let utc = DateTime::<Utc>::from_timestamp_millis(timestamp_millis).unwrap_or_default();
    utc.with_timezone(&jst()).to_rfc3339()
}
