//! Implementation of the `sun` command: the next sunrise or sunset for the stored location.

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use serde::Serialize;

use crate::config::Config;
use crate::geo::{Location, SolarEventQuery, SolarReport, SunriseSolver};
use crate::time::source::parse_datetime;

/// JSON shape of `sun --json`.
#[derive(Debug, Serialize)]
struct SunOutput {
    now: NaiveDateTime,
    offset_minutes: i32,
    location: Location,
    report: SolarReport,
}

/// Handle `sunfocus sun`.
pub fn handle_sun_command(
    debug_enabled: bool,
    config_dir: Option<String>,
    at: Option<String>,
    following: bool,
    json: bool,
) -> Result<()> {
    if json {
        // Keep stdout clean for the JSON document
        crate::logger::Log::set_enabled(false);
    }

    let config: Config = super::prepare(debug_enabled, config_dir)?;
    let at = at
        .as_deref()
        .map(parse_datetime)
        .transpose()
        .map_err(anyhow::Error::msg)?;
    let (now, offset_minutes) = super::local_now(&config, at)?;

    let store = super::open_store(&config)?;
    let mut query = SolarEventQuery::new();
    query.activate(&store)?;
    if following {
        query.toggle_event();
    }

    let report = query.report(now, offset_minutes, &SunriseSolver);

    if json {
        let output = SunOutput {
            now,
            offset_minutes,
            location: query.location(),
            report,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&output).context("Failed to serialize report")?
        );
        return Ok(());
    }

    log_version!();
    log_block_start!(
        "Now: {} (UTC{})",
        now.format("%Y-%m-%d %H:%M"),
        format_offset(offset_minutes)
    );
    match report {
        SolarReport::NoLocation => {
            log_block_start!("No location stored");
            log_indented!("Run 'sunfocus location <latitude> <longitude>' to set one");
        }
        SolarReport::NoEvent { kind, day } => {
            log_block_start!("Location: {}", query.location());
            log_decorated!(
                "{}No {} on {}",
                kind.symbol(),
                kind.display_name().to_lowercase(),
                day.format("%Y-%m-%d")
            );
        }
        SolarReport::NextEvent { kind, at } => {
            log_block_start!("Location: {}", query.location());
            log_decorated!(
                "{}{} {}",
                kind.symbol(),
                kind.display_name(),
                at.format("%Y-%m-%d %H:%M")
            );
        }
    }
    log_end!();

    Ok(())
}

fn format_offset(offset_minutes: i32) -> String {
    let sign = if offset_minutes < 0 { '-' } else { '+' };
    let minutes = offset_minutes.abs();
    format!("{sign}{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Display detailed help for the sun command.
pub fn display_help() {
    log_version!();
    log_block_start!("sun - Show the next sunrise or sunset");
    log_block_start!("Usage: sunfocus sun [OPTIONS]");
    log_block_start!("Options:");
    log_indented!("-a, --at <time>     Resolve at a local time (\"YYYY-MM-DD HH:MM:SS\")");
    log_indented!("-f, --following     Show the event after the next one");
    log_indented!("-j, --json          Print the result as JSON");
    log_block_start!("Examples:");
    log_indented!("sunfocus sun");
    log_indented!("sunfocus sun --at \"2024-06-21 05:00:00\" --following");
    log_end!();
}
