//! `slots` CLI — compute bookable calendar slots from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # List the day's bookable slots, given existing events as JSON
//! slots generate --date 2024-03-01 -i events.json
//!
//! # Same, with events piped on stdin and a 5-minute break after each event
//! cat events.json | slots --break-time 5 generate --date 2024-03-01 -i -
//!
//! # Check an arbitrary candidate interval
//! slots check --start 2024-03-01T10:15:00 --end 2024-03-01T10:45:00 -i events.json
//!
//! # Next free slot after an instant, rendered in a named timezone
//! slots next --after 2024-03-01T13:00:00 -i events.json --tz Europe/Berlin
//!
//! # Minutes between two clock times
//! slots duration 09:00 09:30
//!
//! # Schedule settings from a TOML file, with a flag override
//! slots --config schedule.toml --min-duration 30 generate --date 2024-03-01
//! ```
//!
//! Set `RUST_LOG=debug` to trace config resolution and slot generation on stderr.

mod config;

use std::io::{self, Read};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Serialize;
use slot_engine::{clock, parse_events_json, Event, Slot};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::ScheduleArgs;

#[derive(Parser)]
#[command(
    name = "slots",
    version,
    about = "Bookable slot calculator for calendar booking"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    schedule: ScheduleArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// List the bookable slots for a day
    Generate {
        /// Day to generate slots for (YYYY-MM-DD; a time part is ignored)
        #[arg(long)]
        date: String,
        /// Events JSON file, or "-" for stdin (no events if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Render slots as RFC 3339 instants in this IANA timezone
        #[arg(long)]
        tz: Option<String>,
    },
    /// Check whether a candidate interval is free
    Check {
        /// Candidate start (ISO 8601 date-time)
        #[arg(long)]
        start: String,
        /// Candidate end (ISO 8601 date-time)
        #[arg(long)]
        end: String,
        /// Events JSON file, or "-" for stdin (no events if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Find the first slot starting after an instant on the same day
    Next {
        /// Search from this instant (ISO 8601 date-time)
        #[arg(long)]
        after: String,
        /// Events JSON file, or "-" for stdin (no events if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Render the slot as RFC 3339 instants in this IANA timezone
        #[arg(long)]
        tz: Option<String>,
    },
    /// Minutes between two HH:MM clock times (negative if END precedes START)
    Duration {
        start: String,
        end: String,
    },
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            date,
            input,
            output,
            tz,
        } => {
            let schedule = cli.schedule.build()?;
            let day = parse_day(&date)?;
            let events = read_events(input.as_deref())?;

            let slots = schedule
                .generate_slots(day, &events)
                .context("Failed to generate slots")?;
            info!(%day, events = events.len(), slots = slots.len(), "generated");

            let rendered = match tz.as_deref() {
                Some(zone) => to_pretty(&localize(&slots, day, zone)?)?,
                None => to_pretty(&slots)?,
            };
            write_output(output.as_deref(), &rendered)?;
        }
        Commands::Check { start, end, input } => {
            let schedule = cli.schedule.build()?;
            let start = clock::parse_datetime(&start).context("Invalid --start")?;
            let end = clock::parse_datetime(&end).context("Invalid --end")?;
            let events = read_events(input.as_deref())?;

            let available = schedule
                .is_available(start, end, &events)
                .context("Failed to check availability")?;
            println!("{}", if available { "available" } else { "unavailable" });
        }
        Commands::Next {
            after,
            input,
            output,
            tz,
        } => {
            let schedule = cli.schedule.build()?;
            let after = clock::parse_datetime(&after).context("Invalid --after")?;
            let events = read_events(input.as_deref())?;

            let next = schedule
                .find_next_available(after, &events)
                .context("Failed to search for the next slot")?;

            let rendered = match (next, tz.as_deref()) {
                (Some(slot), Some(zone)) => {
                    let localized = slot
                        .localize(after.date(), zone)
                        .context("Failed to localize slot")?;
                    to_pretty(&localized)?
                }
                (next, _) => to_pretty(&next)?,
            };
            write_output(output.as_deref(), &rendered)?;
        }
        Commands::Duration { start, end } => {
            let minutes = slot_engine::duration(&start, &end)
                .context("Failed to compute duration")?;
            println!("{}", minutes);
        }
    }

    Ok(())
}

/// Log to stderr so stdout stays machine-readable. `RUST_LOG` overrides the
/// default `warn` level.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn parse_day(raw: &str) -> Result<NaiveDate> {
    clock::parse_datetime(raw)
        .map(|dt| dt.date())
        .with_context(|| format!("Invalid --date: {}", raw))
}

fn localize(slots: &[Slot], day: NaiveDate, zone: &str) -> Result<Vec<slot_engine::LocalizedSlot>> {
    slots
        .iter()
        .map(|slot| slot.localize(day, zone))
        .collect::<std::result::Result<Vec<_>, _>>()
        .context("Failed to localize slots")
}

/// Read events from a file or stdin ("-"). No source, or blank input, means
/// an empty calendar.
fn read_events(path: Option<&str>) -> Result<Vec<Event>> {
    let raw = match path {
        None => return Ok(Vec::new()),
        Some("-") => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            buf
        }
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path))?,
    };

    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    parse_events_json(&raw).context("Failed to parse events JSON")
}

fn to_pretty<T: Serialize>(value: &T) -> Result<String> {
    let mut rendered = serde_json::to_string_pretty(value)?;
    rendered.push('\n');
    Ok(rendered)
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
