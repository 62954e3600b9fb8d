//! South African local time helpers.
//!
//! The portal displays everything in SAST, which is a fixed UTC+2 offset with
//! no daylight saving, so a `FixedOffset` is exact and needs no tz database.

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};

const SAST_OFFSET_SECS: i32 = 2 * 3600;

/// The SAST offset (UTC+2).
#[must_use]
pub fn sast() -> FixedOffset {
    FixedOffset::east_opt(SAST_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

/// Current wall-clock time in SAST.
#[must_use]
pub fn sast_now() -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&sast())
}

/// Today's calendar date in SAST.
#[must_use]
pub fn sast_today() -> NaiveDate {
    sast_now().date_naive()
}

/// Converts a Unix timestamp (seconds) to SAST. Returns `None` when the value
/// is outside chrono's representable range.
#[must_use]
pub fn from_unix(secs: i64) -> Option<DateTime<FixedOffset>> {
    DateTime::from_timestamp(secs, 0).map(|dt| dt.with_timezone(&sast()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn sast_is_two_hours_ahead_of_utc() {
        assert_eq!(sast().local_minus_utc(), 7200);
    }

    #[test]
    fn from_unix_shifts_into_local_time() {
        // 2026-03-01T22:30:00Z
        let local = from_unix(1_772_404_200).expect("in range");
        assert_eq!(local.date_naive().to_string(), "2026-03-02");
        assert_eq!(local.hour(), 0);
        assert_eq!(local.minute(), 30);
    }
}
