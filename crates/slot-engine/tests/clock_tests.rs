//! Tests for clock parsing, time normalization, and timezone-explicit rendering.

use chrono::NaiveDate;
use slot_engine::clock::{parse_clock, parse_datetime, parse_datetime_on};
use slot_engine::{duration, format_time, Slot, SlotError};

fn slot(start: &str, end: &str) -> Slot {
    Slot {
        start: parse_clock(start).unwrap(),
        end: parse_clock(end).unwrap(),
        available: true,
    }
}

// ── parse_datetime ──────────────────────────────────────────────────────────

#[test]
fn naive_iso_without_seconds() {
    let dt = parse_datetime("2025-03-24T09:00").unwrap();
    assert_eq!(dt.to_string(), "2025-03-24 09:00:00");
}

#[test]
fn bare_date_is_midnight() {
    let dt = parse_datetime("2024-03-01").unwrap();
    assert_eq!(dt.to_string(), "2024-03-01 00:00:00");
}

#[test]
fn utc_suffix_keeps_wall_clock() {
    let dt = parse_datetime("2024-03-01T13:00:00Z").unwrap();
    assert_eq!(dt.to_string(), "2024-03-01 13:00:00");
}

#[test]
fn clock_only_needs_a_day() {
    let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    assert!(parse_datetime("13:00:00").is_err());
    assert_eq!(
        parse_datetime_on("13:00:00", day).unwrap().to_string(),
        "2024-03-01 13:00:00"
    );
}

#[test]
fn garbage_is_invalid_time_format() {
    let err = parse_datetime("next tuesday").unwrap_err();
    assert!(matches!(err, SlotError::InvalidTimeFormat(_)));
    assert_eq!(err.to_string(), "Invalid time format: next tuesday");
}

// ── duration ────────────────────────────────────────────────────────────────

#[test]
fn duration_of_equal_times_is_zero() {
    assert_eq!(duration("12:34", "12:34").unwrap(), 0);
}

#[test]
fn duration_rounds_to_nearest_minute() {
    assert_eq!(duration("10:00:00", "10:00:29").unwrap(), 0);
    assert_eq!(duration("10:00:00", "10:14:45").unwrap(), 15);
}

// ── format_time ─────────────────────────────────────────────────────────────

#[test]
fn format_time_passes_through_clock() {
    assert_eq!(format_time("09:00").unwrap(), "09:00");
}

#[test]
fn format_time_extracts_clock_from_iso() {
    assert_eq!(format_time("2025-03-24T09:00").unwrap(), "09:00");
    assert_eq!(format_time("2025-03-24T17:45:00+02:00").unwrap(), "17:45");
}

#[test]
fn format_time_pads_short_fields() {
    assert_eq!(format_time("9:5").unwrap(), "09:05");
}

#[test]
fn format_time_rejects_out_of_range_and_junk() {
    assert!(format_time("24:00").is_err());
    assert!(format_time("noon").is_err());
    assert!(format_time("123:00").is_err());
}

// ── Slot::localize ──────────────────────────────────────────────────────────

#[test]
fn localize_renders_offset_of_named_zone() {
    let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let local = slot("09:00", "09:30").localize(day, "America/New_York").unwrap();

    assert_eq!(local.start, "2024-03-01T09:00:00-05:00");
    assert_eq!(local.end, "2024-03-01T09:30:00-05:00");
    assert_eq!(local.timezone, "America/New_York");
}

#[test]
fn localize_wrapped_end_lands_next_day() {
    let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let local = slot("23:45", "00:15").localize(day, "UTC").unwrap();

    assert_eq!(local.end, "2024-03-02T00:15:00+00:00");
}

#[test]
fn localize_unknown_zone_fails() {
    let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let err = slot("09:00", "09:30").localize(day, "Mars/Olympus").unwrap_err();
    assert!(matches!(err, SlotError::InvalidTimezone(_)));
}

#[test]
fn localize_in_dst_gap_fails() {
    // 02:30 does not exist in New York on 2024-03-10.
    let day = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
    let err = slot("02:30", "03:00").localize(day, "America/New_York").unwrap_err();
    assert!(matches!(err, SlotError::InvalidTimeFormat(_)));
}
