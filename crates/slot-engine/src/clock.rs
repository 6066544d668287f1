//! Wall-clock parsing and formatting.
//!
//! Every time the engine hands back to callers is a zero-padded `HH:MM` string.
//! Parsing accepts seconds (`HH:MM:SS`) because date-time inputs usually carry
//! them; formatting never emits them.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::error::{Result, SlotError};

const CLOCK_FORMATS: &[&str] = &["%H:%M", "%H:%M:%S", "%H:%M:%S%.f"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse a wall-clock time such as `"09:00"` or `"14:30:00"`.
///
/// # Errors
/// Returns `SlotError::InvalidTimeFormat` if the string is not a valid clock time.
pub fn parse_clock(s: &str) -> Result<NaiveTime> {
    let trimmed = s.trim();
    CLOCK_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| SlotError::InvalidTimeFormat(s.to_string()))
}

/// Format a clock time as zero-padded `HH:MM`.
pub fn format_clock(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Drop seconds and sub-second precision, keeping `HH:MM`.
pub fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    time.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(time)
}

/// Parse a date-bearing string into a naive local date-time.
///
/// Accepts RFC 3339 (the wall-clock part is kept, the offset is discarded),
/// naive ISO 8601 date-times with `T` or space separators, and bare dates
/// (`YYYY-MM-DD`, interpreted as midnight).
///
/// # Errors
/// Returns `SlotError::InvalidTimeFormat` if no accepted form matches.
pub fn parse_datetime(s: &str) -> Result<NaiveDateTime> {
    let trimmed = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.naive_local());
    }

    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
    {
        return Ok(dt);
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN))
        .map_err(|_| SlotError::InvalidTimeFormat(s.to_string()))
}

/// Parse a date-time, placing bare clock times (`"13:00:00"`) on `day`.
///
/// # Errors
/// Returns `SlotError::InvalidTimeFormat` if the string is neither a date-time
/// nor a clock time.
pub fn parse_datetime_on(s: &str, day: NaiveDate) -> Result<NaiveDateTime> {
    parse_datetime(s).or_else(|_| parse_clock(s).map(|time| day.and_time(time)))
}

/// Minutes between two `HH:MM` clock times on a common reference day.
///
/// The difference is rounded to the nearest minute (ties away from zero) and
/// may be negative when `end` precedes `start`.
///
/// # Errors
/// Returns `SlotError::InvalidTimeFormat` if either argument is not a clock time.
pub fn duration(start: &str, end: &str) -> Result<i64> {
    let start = parse_clock(start)?;
    let end = parse_clock(end)?;
    let millis = end.signed_duration_since(start).num_milliseconds();
    Ok((millis as f64 / 60_000.0).round() as i64)
}

/// Normalize a time-ish string to `HH:MM`.
///
/// `"09:00"` passes through, `"2025-03-24T09:00"` yields its clock part, and
/// unpadded forms such as `"9:5"` are zero-padded.
///
/// # Errors
/// Returns `SlotError::InvalidTimeFormat` if no hour and minute can be extracted.
pub fn format_time(input: &str) -> Result<String> {
    let invalid = || SlotError::InvalidTimeFormat(input.to_string());

    let trimmed = input.trim();
    let clock = match trimmed.split_once('T') {
        Some((_, time)) => time,
        None => trimmed,
    };

    let (hours, rest) = clock.split_once(':').ok_or_else(invalid)?;
    let minutes: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();

    if hours.is_empty() || hours.len() > 2 || !hours.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    if minutes.is_empty() || minutes.len() > 2 {
        return Err(invalid());
    }

    let hour: u32 = hours.parse().map_err(|_| invalid())?;
    let minute: u32 = minutes.parse().map_err(|_| invalid())?;
    NaiveTime::from_hms_opt(hour, minute, 0)
        .map(format_clock)
        .ok_or_else(invalid)
}

/// Serde adapter for `NaiveTime` fields exchanged as `HH:MM` strings.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_clock(*time))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> std::result::Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_clock(&raw).map_err(de::Error::custom)
    }
}
