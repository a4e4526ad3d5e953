//! Calendar date parsing and the day/week/month query windows.

use chrono::{Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

/// Wire format of every date accepted or returned by the API.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a strict `YYYY-MM-DD` date.
///
/// chrono alone accepts unpadded fields such as `2025-9-1`; the shape check
/// keeps the wire format exact.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let bytes = value.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return None;
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

/// Timestamp a date is stored under.
pub fn day_start(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Inclusive window `[date 00:00:00, date + 6 days 23:59:59]`.
pub fn week_window(date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    let start = day_start(date);
    let end = start + TimeDelta::days(7) - TimeDelta::seconds(1);
    (start, end)
}

/// Half-open window `[date, date + 1 calendar month)`.
///
/// Month arithmetic clamps to the last valid day of the target month, so
/// `2025-01-31` ends at `2025-02-28` and `2025-03-31` ends at `2025-04-30`.
pub fn month_window(date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    let end = date
        .checked_add_months(Months::new(1))
        .unwrap_or(NaiveDate::MAX);
    (day_start(date), day_start(end))
}
