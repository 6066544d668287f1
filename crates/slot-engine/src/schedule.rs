//! Slot generation and availability queries for a single day.
//!
//! A [`Schedule`] walks candidate slots of `defaultDuration` minutes across
//! the working hours on a `minDuration` grid, keeping each candidate that no
//! existing event blocks. Events may arrive unsorted, overlapping, or
//! duplicated; every check is an any-match over the full list.
//!
//! A candidate `[start, end]` is blocked by an event `[s, e]` when any of:
//!
//! - `start` lies in `[s, e]`
//! - `end` lies in `[s, e]`
//! - `s` lies in `[start, end + breakTime]`
//!
//! All three intervals are closed, so a candidate ending exactly when an event
//! starts is blocked, as is one starting exactly when an event ends.
//!
//! Slot generation additionally holds back candidates that start inside an
//! event's trailing break `(e, e + breakTime)`, so no generated slot begins
//! before the break after any event has elapsed.

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, trace};

use crate::clock;
use crate::config::ScheduleConfig;
use crate::error::Result;
use crate::event::{resolve_events, BusyInterval, Event};
use crate::slot::Slot;

/// The availability engine: an immutable [`ScheduleConfig`] plus pure queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Schedule {
    config: ScheduleConfig,
}

impl Schedule {
    /// Create an engine for `config`.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidConfig` if the config cannot produce a
    /// bounded slot grid (see [`ScheduleConfig::validate`]).
    pub fn new(config: ScheduleConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    /// Bookable slots on `day`, ascending by start.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidTimeFormat` if any event bound is unparsable.
    pub fn generate_slots(&self, day: NaiveDate, events: &[Event]) -> Result<Vec<Slot>> {
        let busy = resolve_events(events, day)?;
        Ok(self.generate_slots_busy(day, &busy))
    }

    /// Bookable slots on `day` for already-parsed busy intervals.
    ///
    /// The cursor starts at working-hours start and runs while it is before
    /// working-hours end; a slot's end may extend past closing. After a kept
    /// candidate the cursor advances one grid step. After a blocked one it
    /// advances one grid step or resumes at the blocking event's end plus the
    /// break, whichever is later.
    pub fn generate_slots_busy(&self, day: NaiveDate, busy: &[BusyInterval]) -> Vec<Slot> {
        let length = self.config.slot_length();
        let step = self.config.grid_step();

        let mut cursor = day.and_time(self.config.working_hours.start);
        let close = day.and_time(self.config.working_hours.end);
        let mut slots = Vec::new();

        while cursor < close {
            let slot_end = cursor + length;
            match self.resume_after_block(cursor, slot_end, busy) {
                None => {
                    slots.push(Slot::bookable(cursor, slot_end));
                    cursor += step;
                }
                Some(resume) => {
                    trace!(candidate = %cursor, resume = %resume, "candidate blocked");
                    cursor = resume.max(cursor + step);
                }
            }
        }

        debug!(%day, busy = busy.len(), slots = slots.len(), "generated slots");
        slots
    }

    /// Whether `[start, end]` is free of every event, honoring break time.
    ///
    /// Bare clock times in `events` are placed on `start`'s day.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidTimeFormat` if any event bound is unparsable.
    pub fn is_available(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        events: &[Event],
    ) -> Result<bool> {
        let busy = resolve_events(events, start.date())?;
        Ok(self.is_available_busy(start, end, &busy))
    }

    pub fn is_available_busy(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        busy: &[BusyInterval],
    ) -> bool {
        !busy.iter().any(|interval| self.blocks(interval, start, end))
    }

    /// First slot on `after`'s day whose `HH:MM` start is strictly later than
    /// `after`'s `HH:MM`. `None` when the rest of the day is booked or closed.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidTimeFormat` if any event bound is unparsable.
    pub fn find_next_available(
        &self,
        after: NaiveDateTime,
        events: &[Event],
    ) -> Result<Option<Slot>> {
        let busy = resolve_events(events, after.date())?;
        Ok(self.find_next_available_busy(after, &busy))
    }

    pub fn find_next_available_busy(
        &self,
        after: NaiveDateTime,
        busy: &[BusyInterval],
    ) -> Option<Slot> {
        let threshold = clock::truncate_to_minute(after.time());
        self.generate_slots_busy(after.date(), busy)
            .into_iter()
            .find(|slot| slot.available && clock::truncate_to_minute(slot.start) > threshold)
    }

    /// Minutes from `start` to `end`, both `HH:MM`. See [`clock::duration`].
    ///
    /// # Errors
    /// Returns `SlotError::InvalidTimeFormat` if either argument is unparsable.
    pub fn duration(&self, start: &str, end: &str) -> Result<i64> {
        clock::duration(start, end)
    }

    fn blocks(&self, interval: &BusyInterval, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        let guarded_end = end + self.config.break_length();
        interval.contains(start)
            || interval.contains(end)
            || (start <= interval.start && interval.start <= guarded_end)
    }

    fn holds_back(&self, interval: &BusyInterval, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        let break_over = interval.end + self.config.break_length();
        self.blocks(interval, start, end) || (interval.end < start && start < break_over)
    }

    /// Latest `end + breakTime` among the intervals holding the candidate
    /// back, or `None` when the candidate is bookable.
    fn resume_after_block(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        busy: &[BusyInterval],
    ) -> Option<NaiveDateTime> {
        busy.iter()
            .filter(|interval| self.holds_back(interval, start, end))
            .map(|interval| interval.end + self.config.break_length())
            .max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_time(NaiveTime::from_hms_opt(h, m, 0).unwrap())
    }

    #[test]
    fn candidate_ending_at_event_start_is_blocked() {
        let schedule = Schedule::default();
        let busy = [BusyInterval::new(at(10, 0), at(11, 0))];
        assert!(!schedule.is_available_busy(at(9, 30), at(10, 0), &busy));
    }

    #[test]
    fn candidate_starting_at_event_end_is_blocked() {
        let schedule = Schedule::default();
        let busy = [BusyInterval::new(at(10, 0), at(11, 0))];
        assert!(!schedule.is_available_busy(at(11, 0), at(11, 30), &busy));
    }

    #[test]
    fn generation_holds_back_start_inside_trailing_break() {
        let schedule = Schedule::new(ScheduleConfig {
            break_time: 5,
            ..ScheduleConfig::default()
        })
        .unwrap();
        let busy = [BusyInterval::new(at(10, 2), at(10, 3))];
        assert!(schedule.is_available_busy(at(10, 5), at(10, 35), &busy));
        assert_eq!(
            schedule.resume_after_block(at(10, 5), at(10, 35), &busy),
            Some(at(10, 8))
        );
    }

    #[test]
    fn resume_uses_latest_blocking_event() {
        let schedule = Schedule::new(ScheduleConfig {
            break_time: 5,
            ..ScheduleConfig::default()
        })
        .unwrap();
        let busy = [
            BusyInterval::new(at(10, 0), at(10, 20)),
            BusyInterval::new(at(10, 10), at(11, 0)),
        ];
        assert_eq!(
            schedule.resume_after_block(at(10, 0), at(10, 30), &busy),
            Some(at(11, 5))
        );
    }
}
