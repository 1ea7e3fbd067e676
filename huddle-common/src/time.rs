//! Service-date and timestamp utilities
//!
//! The service date is a pure function of wall-clock time plus the
//! configured reporting offset. It is recomputed on every operation;
//! nothing here holds state, so long-lived processes never see a stale
//! date after midnight.

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Compute the service date for a given instant under a fixed UTC offset
/// (minutes east of UTC).
///
/// An out-of-range offset falls back to UTC rather than failing: the
/// reporting date is an auxiliary input, and a misconfigured offset should
/// not take check-in down.
pub fn service_date_at(instant: DateTime<Utc>, utc_offset_minutes: i32) -> NaiveDate {
    let offset = FixedOffset::east_opt(utc_offset_minutes * 60).unwrap_or_else(|| Utc.fix());
    instant.with_timezone(&offset).date_naive()
}

/// Today's service date in the reporting timezone, as stored in
/// `attendance_log.service_date` (`YYYY-MM-DD`).
pub fn service_date_today(utc_offset_minutes: i32) -> String {
    service_date_at(now(), utc_offset_minutes)
        .format("%Y-%m-%d")
        .to_string()
}

/// Current check-in timestamp as stored in `attendance_log.check_in_time`
/// (RFC 3339, UTC).
pub fn check_in_timestamp() -> String {
    now().to_rfc3339()
}
