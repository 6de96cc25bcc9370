// src/core/when.rs
//
// Timestamp parsing for the submission-time column. KoboToolbox emits
// RFC 3339 with offsets; older exports carry naive or date-only forms,
// so we fall through a short list before giving up.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Parse one timestamp cell. Offset-carrying values are converted to
/// their UTC instant; naive values are taken as written. Returns None
/// for anything unrecognized.
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(dt);
        }
    }
    if let Ok(d) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(day_start(d));
    }
    None
}

/// Midnight opening the given day.
pub fn day_start(d: NaiveDate) -> NaiveDateTime {
    d.and_hms_opt(0, 0, 0).expect("midnight exists on every date")
}

/// 23:59:59 on the given day. The range end is inclusive of the whole
/// last second but not of anything after it.
pub fn day_end(d: NaiveDate) -> NaiveDateTime {
    d.and_hms_opt(23, 59, 59).expect("23:59:59 exists on every date")
}
