//! # slot-engine
//!
//! Deterministic bookable-slot generation for calendar booking clients.
//!
//! Given working hours, a slot length, a grid step, a break time, and the day's
//! existing bookings, the engine lists the bookable slots, tests arbitrary
//! candidates for availability, and finds the next free slot after an instant.
//! Every query is a pure function of its inputs and the immutable config.
//!
//! ## Quick start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use slot_engine::{Event, Schedule, ScheduleConfig};
//!
//! let schedule = Schedule::new(ScheduleConfig {
//!     break_time: 5,
//!     ..ScheduleConfig::default()
//! })
//! .unwrap();
//!
//! let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
//! let events = [Event::new("2024-03-01T14:00:00", "2024-03-01T14:30:00")];
//! let slots = schedule.generate_slots(day, &events).unwrap();
//!
//! assert!(slots.iter().any(|s| s.to_string() == "14:35-15:05"));
//! ```
//!
//! ## Modules
//!
//! - [`schedule`] — slot generation, availability checks, next-slot search
//! - [`config`] — `ScheduleConfig` with defaults and validation
//! - [`event`] — caller-supplied bookings and their parsed busy intervals
//! - [`slot`] — `Slot` output type and timezone-explicit rendering
//! - [`clock`] — `HH:MM` parsing, formatting, and minute durations
//! - [`error`] — Error types

pub mod clock;
pub mod config;
pub mod error;
pub mod event;
pub mod schedule;
pub mod slot;

pub use clock::{duration, format_time};
pub use config::{ScheduleConfig, WorkingHours};
pub use error::SlotError;
pub use event::{parse_events_json, BusyInterval, Event};
pub use schedule::Schedule;
pub use slot::{LocalizedSlot, Slot};
