//! WASM bindings for slot-engine.
//!
//! Exposes slot generation, availability checks, next-slot search, and
//! duration calculation to the booking web client via `wasm-bindgen`. Config,
//! events, and slots cross the boundary as JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/slot-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! ```

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use slot_engine::{clock, parse_events_json, Event, Schedule, ScheduleConfig};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Boundary helpers
// ---------------------------------------------------------------------------

fn to_js(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Build a schedule from a camelCase config object. Missing fields default,
/// and an empty string means "all defaults".
fn schedule_from_json(config_json: &str) -> Result<Schedule, String> {
    let config: ScheduleConfig = if config_json.trim().is_empty() {
        ScheduleConfig::default()
    } else {
        serde_json::from_str(config_json).map_err(|e| format!("Invalid config JSON: {}", e))?
    };
    Schedule::new(config).map_err(|e| e.to_string())
}

fn events_from_json(events_json: &str) -> Result<Vec<Event>, String> {
    if events_json.trim().is_empty() {
        return Ok(Vec::new());
    }
    parse_events_json(events_json).map_err(|e| e.to_string())
}

fn parse_instant(s: &str) -> Result<NaiveDateTime, String> {
    clock::parse_datetime(s).map_err(|e| e.to_string())
}

fn parse_day(s: &str) -> Result<NaiveDate, String> {
    parse_instant(s).map(|dt| dt.date())
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

// ---------------------------------------------------------------------------
// Plain-Rust implementations (testable off the wasm32 target)
// ---------------------------------------------------------------------------

fn generate_slots_impl(config_json: &str, day: &str, events_json: &str) -> Result<String, String> {
    let schedule = schedule_from_json(config_json)?;
    let day = parse_day(day)?;
    let events = events_from_json(events_json)?;
    let slots = schedule
        .generate_slots(day, &events)
        .map_err(|e| e.to_string())?;
    to_json(&slots)
}

fn is_available_impl(
    config_json: &str,
    start: &str,
    end: &str,
    events_json: &str,
) -> Result<bool, String> {
    let schedule = schedule_from_json(config_json)?;
    let start = parse_instant(start)?;
    let end = parse_instant(end)?;
    let events = events_from_json(events_json)?;
    schedule
        .is_available(start, end, &events)
        .map_err(|e| e.to_string())
}

fn find_next_available_impl(
    config_json: &str,
    after: &str,
    events_json: &str,
) -> Result<String, String> {
    let schedule = schedule_from_json(config_json)?;
    let after = parse_instant(after)?;
    let events = events_from_json(events_json)?;
    let next = schedule
        .find_next_available(after, &events)
        .map_err(|e| e.to_string())?;
    to_json(&next)
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Generate the bookable slots for a day.
///
/// `config_json` is a `{defaultDuration, minDuration, workingHours, breakTime}`
/// object (fields optional), `day` an ISO 8601 date or date-time, and
/// `events_json` a JSON array of `{start, end}` objects. Returns a JSON array
/// of `{start: "HH:MM", end: "HH:MM", available: true}`.
#[wasm_bindgen(js_name = "generateSlots")]
pub fn generate_slots(config_json: &str, day: &str, events_json: &str) -> Result<String, JsValue> {
    generate_slots_impl(config_json, day, events_json).map_err(to_js)
}

/// Check whether the candidate `[start, end]` is free of every event.
#[wasm_bindgen(js_name = "isAvailable")]
pub fn is_available(
    config_json: &str,
    start: &str,
    end: &str,
    events_json: &str,
) -> Result<bool, JsValue> {
    is_available_impl(config_json, start, end, events_json).map_err(to_js)
}

/// Find the first slot starting strictly after `after` on the same day.
///
/// Returns the slot as a JSON object, or the string `"null"` when none remains.
#[wasm_bindgen(js_name = "findNextAvailable")]
pub fn find_next_available(
    config_json: &str,
    after: &str,
    events_json: &str,
) -> Result<String, JsValue> {
    find_next_available_impl(config_json, after, events_json).map_err(to_js)
}

/// Minutes between two `HH:MM` clock times, rounded; negative if `end < start`.
#[wasm_bindgen(js_name = "calculateDuration")]
pub fn calculate_duration(start: &str, end: &str) -> Result<i32, JsValue> {
    slot_engine::duration(start, end)
        .map(|minutes| minutes as i32)
        .map_err(to_js)
}

/// Normalize a time string (`HH:MM`, ISO date-time, or `H:M`) to `HH:MM`.
#[wasm_bindgen(js_name = "formatTime")]
pub fn format_time(time: &str) -> Result<String, JsValue> {
    slot_engine::format_time(time).map_err(to_js)
}

/// Render slots for a day in an explicit IANA timezone.
///
/// `slots_json` is the output of [`generate_slots`]. Returns a JSON array of
/// `{start, end, timezone}` with RFC 3339 instants.
#[wasm_bindgen(js_name = "localizeSlots")]
pub fn localize_slots(slots_json: &str, day: &str, timezone: &str) -> Result<String, JsValue> {
    localize_slots_impl(slots_json, day, timezone).map_err(to_js)
}

fn localize_slots_impl(slots_json: &str, day: &str, timezone: &str) -> Result<String, String> {
    let slots: Vec<slot_engine::Slot> =
        serde_json::from_str(slots_json).map_err(|e| format!("Invalid slots JSON: {}", e))?;
    let day = parse_day(day)?;
    let localized = slots
        .iter()
        .map(|slot| slot.localize(day, timezone))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| e.to_string())?;
    to_json(&localized)
}
