//! Date and time-of-day parsing for sighting tables.
//!
//! Spreadsheet exports are inconsistent: the same column may hold
//! `2024-01-15`, `2024/1/15`, or `2024-01-15 00:00:00` depending on which
//! tool saved the file. Each parser tries a fixed list of formats in order.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d", "%m/%d/%Y", "%Y%m%d"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M:%S%.f", "%H:%M", "%H%M%S"];

/// Parses a calendar date. A trailing time component is accepted and
/// discarded.
#[must_use]
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    None
}

/// Parses a time of day.
///
/// Besides the colon-separated forms, bare `HHMMSS` and `HHMM` digit
/// strings are accepted.
#[must_use]
pub fn parse_time(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    for fmt in TIME_FORMATS {
        if let Ok(time) = NaiveTime::parse_from_str(s, fmt) {
            return Some(time);
        }
    }
    // 4-digit HHMM, which chrono's %H%M cannot disambiguate from HHMMSS
    if s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit()) {
        let hour = s[..2].parse::<u32>().ok()?;
        let min = s[2..].parse::<u32>().ok()?;
        return NaiveTime::from_hms_opt(hour, min, 0);
    }
    None
}

/// Combines separate date and time cells into one timestamp.
#[must_use]
pub fn parse_timestamp(date: &str, time: &str) -> Option<NaiveDateTime> {
    Some(NaiveDateTime::new(parse_date(date)?, parse_time(time)?))
}
