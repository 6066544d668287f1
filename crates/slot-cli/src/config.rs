//! Schedule configuration for the CLI: an optional TOML file, then flags.
//!
//! The file uses the same camelCase keys as the web client's config object:
//!
//! ```toml
//! defaultDuration = 30
//! minDuration = 15
//! breakTime = 5
//!
//! [workingHours]
//! start = "09:00"
//! end = "17:00"
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use slot_engine::{clock, Schedule, ScheduleConfig};
use tracing::debug;

/// Flags that override individual config values.
#[derive(Args, Debug)]
pub struct ScheduleArgs {
    /// TOML file with defaultDuration, minDuration, workingHours, breakTime
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Slot length in minutes
    #[arg(long, global = true)]
    pub default_duration: Option<u32>,

    /// Grid step between slot starts, in minutes
    #[arg(long, global = true)]
    pub min_duration: Option<u32>,

    /// Working hours start (HH:MM)
    #[arg(long, global = true)]
    pub working_start: Option<String>,

    /// Working hours end (HH:MM)
    #[arg(long, global = true)]
    pub working_end: Option<String>,

    /// Minutes of break enforced after each existing event
    #[arg(long, global = true)]
    pub break_time: Option<u32>,
}

impl ScheduleArgs {
    /// Layer defaults, the config file, and flags, then validate.
    pub fn build(&self) -> Result<Schedule> {
        let mut config = match self.config.as_deref() {
            Some(path) => load_config(Path::new(path))?,
            None => ScheduleConfig::default(),
        };

        if let Some(minutes) = self.default_duration {
            config.default_duration = minutes;
        }
        if let Some(minutes) = self.min_duration {
            config.min_duration = minutes;
        }
        if let Some(start) = self.working_start.as_deref() {
            config.working_hours.start = clock::parse_clock(start)
                .with_context(|| format!("Invalid --working-start: {}", start))?;
        }
        if let Some(end) = self.working_end.as_deref() {
            config.working_hours.end = clock::parse_clock(end)
                .with_context(|| format!("Invalid --working-end: {}", end))?;
        }
        if let Some(minutes) = self.break_time {
            config.break_time = minutes;
        }

        debug!(?config, "resolved schedule config");
        Schedule::new(config).context("Invalid schedule configuration")
    }
}

/// Load a schedule config from a TOML file. Missing keys take defaults.
pub fn load_config(path: &Path) -> Result<ScheduleConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file at {}", path.display()))?;

    toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file at {}", path.display()))
}
