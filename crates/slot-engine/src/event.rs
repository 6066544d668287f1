//! Existing bookings supplied by the caller, and their resolution onto a day.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::clock;
use crate::error::Result;

/// An already-booked event as received from the booking data source.
///
/// `start` and `end` are ISO 8601 date-time strings. A bare clock time is also
/// accepted and is placed on whichever day is being queried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub start: String,
    pub end: String,
}

impl Event {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Parse this event's bounds into a [`BusyInterval`] relative to `day`.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidTimeFormat` if either bound is unparsable.
    pub fn resolve(&self, day: NaiveDate) -> Result<BusyInterval> {
        let start = clock::parse_datetime_on(&self.start, day)?;
        let end = clock::parse_datetime_on(&self.end, day)?;
        Ok(BusyInterval::new(start, end))
    }
}

/// A busy period with parsed instants. `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusyInterval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl BusyInterval {
    /// Build an interval, ordering the two instants if they arrive inverted.
    pub fn new(a: NaiveDateTime, b: NaiveDateTime) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    /// Closed-interval membership: both boundary instants count as inside.
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start <= instant && instant <= self.end
    }
}

/// Resolve every event onto `day`, failing on the first unparsable bound.
///
/// # Errors
/// Returns `SlotError::InvalidTimeFormat` naming the offending string.
pub fn resolve_events(events: &[Event], day: NaiveDate) -> Result<Vec<BusyInterval>> {
    events
        .iter()
        .map(|event| {
            event.resolve(day).inspect_err(|e| {
                debug!(start = %event.start, end = %event.end, error = %e, "unparsable event");
            })
        })
        .collect()
}

/// Parse a JSON array of `{start, end}` objects.
///
/// # Errors
/// Returns `SlotError::EventsJson` if the payload is not such an array.
pub fn parse_events_json(json: &str) -> Result<Vec<Event>> {
    Ok(serde_json::from_str(json)?)
}
