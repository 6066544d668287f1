//! Schedule configuration: slot length, grid step, working hours, break time.
//!
//! Every field is optional on input. Missing fields fall back to a 30-minute
//! slot on a 15-minute grid between 09:00 and 17:00 with no break. Keys are
//! camelCase so configuration objects from the web client deserialize as-is.

use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::clock::{self, hhmm};
use crate::error::{Result, SlotError};

/// Daily window within which slots may start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHours {
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
}

impl WorkingHours {
    /// Build working hours from two `HH:MM` strings.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidTimeFormat` if either bound fails to parse.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Ok(Self {
            start: clock::parse_clock(start)?,
            end: clock::parse_clock(end)?,
        })
    }

    /// Length of the window in whole minutes.
    pub fn span_minutes(&self) -> i64 {
        self.end.signed_duration_since(self.start).num_minutes()
    }
}

impl Default for WorkingHours {
    fn default() -> Self {
        Self {
            start: NaiveTime::MIN + Duration::hours(9),
            end: NaiveTime::MIN + Duration::hours(17),
        }
    }
}

/// Immutable scheduling policy held by a [`Schedule`](crate::Schedule).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScheduleConfig {
    /// Slot length in minutes.
    pub default_duration: u32,
    /// Spacing between candidate slot starts, in minutes.
    pub min_duration: u32,
    pub working_hours: WorkingHours,
    /// Minutes that must pass after a busy interval before a slot may start.
    pub break_time: u32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            default_duration: 30,
            min_duration: 15,
            working_hours: WorkingHours::default(),
            break_time: 0,
        }
    }
}

impl ScheduleConfig {
    /// Check that the config yields a bounded, non-empty slot grid.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidConfig` when the slot length or grid step is
    /// zero, or when working hours do not start before they end.
    pub fn validate(&self) -> Result<()> {
        if self.default_duration == 0 {
            return Err(SlotError::InvalidConfig(
                "defaultDuration must be greater than zero".to_string(),
            ));
        }
        if self.min_duration == 0 {
            return Err(SlotError::InvalidConfig(
                "minDuration must be greater than zero".to_string(),
            ));
        }
        if self.working_hours.start >= self.working_hours.end {
            return Err(SlotError::InvalidConfig(format!(
                "working hours start {} must precede end {}",
                clock::format_clock(self.working_hours.start),
                clock::format_clock(self.working_hours.end),
            )));
        }
        Ok(())
    }

    pub(crate) fn slot_length(&self) -> Duration {
        Duration::minutes(i64::from(self.default_duration))
    }

    pub(crate) fn grid_step(&self) -> Duration {
        Duration::minutes(i64::from(self.min_duration))
    }

    pub(crate) fn break_length(&self) -> Duration {
        Duration::minutes(i64::from(self.break_time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config: ScheduleConfig = serde_json::from_str(r#"{"breakTime": 5}"#).unwrap();
        assert_eq!(config.default_duration, 30);
        assert_eq!(config.min_duration, 15);
        assert_eq!(config.break_time, 5);
        assert_eq!(config.working_hours, WorkingHours::default());
    }

    #[test]
    fn working_hours_round_trip_as_clock_strings() {
        let json = r#"{"workingHours":{"start":"08:30","end":"12:00"}}"#;
        let config: ScheduleConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.working_hours.span_minutes(), 210);

        let back = serde_json::to_value(config).unwrap();
        assert_eq!(back["workingHours"]["start"], "08:30");
        assert_eq!(back["defaultDuration"], 30);
    }

    #[test]
    fn zero_grid_step_rejected() {
        let config = ScheduleConfig {
            min_duration: 0,
            ..ScheduleConfig::default()
        };
        assert!(matches!(config.validate(), Err(SlotError::InvalidConfig(_))));
    }
}
