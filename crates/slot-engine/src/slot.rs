//! Bookable slots and their timezone-explicit presentation.

use std::fmt;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::clock::{self, hhmm};
use crate::error::{Result, SlotError};

/// A bookable interval on the queried day, exchanged as `HH:MM` strings.
///
/// Slots returned by the engine always carry `available: true`; blocked
/// candidates are omitted rather than returned with the flag cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
    pub available: bool,
}

/// A slot rendered as RFC 3339 instants in a named timezone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedSlot {
    pub start: String,
    pub end: String,
    pub timezone: String,
}

impl Slot {
    pub(crate) fn bookable(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start: start.time(),
            end: end.time(),
            available: true,
        }
    }

    /// Slot length in minutes. A slot whose end wrapped past midnight still
    /// reports its true length.
    pub fn minutes(&self) -> i64 {
        let raw = self.end.signed_duration_since(self.start);
        if raw < Duration::zero() {
            (raw + Duration::days(1)).num_minutes()
        } else {
            raw.num_minutes()
        }
    }

    /// Render the slot on `day` as wall-clock time in the IANA zone `tz`.
    ///
    /// The slot's clock times are taken to be local to `tz`; nothing is
    /// converted between zones. An end that wrapped past midnight lands on the
    /// following day.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidTimezone` for an unknown zone, and
    /// `SlotError::InvalidTimeFormat` when a bound falls in a DST gap.
    pub fn localize(&self, day: NaiveDate, tz: &str) -> Result<LocalizedSlot> {
        let zone: Tz = tz
            .parse()
            .map_err(|_| SlotError::InvalidTimezone(tz.to_string()))?;

        let start = day.and_time(self.start);
        let end = start + Duration::minutes(self.minutes());

        let to_local = |naive: NaiveDateTime| {
            zone.from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.to_rfc3339())
                .ok_or_else(|| {
                    SlotError::InvalidTimeFormat(format!("{} does not exist in {}", naive, tz))
                })
        };

        Ok(LocalizedSlot {
            start: to_local(start)?,
            end: to_local(end)?,
            timezone: tz.to_string(),
        })
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            clock::format_clock(self.start),
            clock::format_clock(self.end)
        )
    }
}
