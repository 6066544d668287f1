//! Error types for slot-engine operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlotError {
    /// A clock time or date-time string could not be parsed.
    #[error("Invalid time format: {0}")]
    InvalidTimeFormat(String),

    /// The schedule configuration cannot produce a bounded slot grid.
    #[error("Invalid schedule config: {0}")]
    InvalidConfig(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// The events payload was not a JSON array of `{start, end}` objects.
    #[error("Invalid events JSON: {0}")]
    EventsJson(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SlotError>;
