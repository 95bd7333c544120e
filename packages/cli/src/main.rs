#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line entry point for vehicle sighting analysis.
//!
//! Each subcommand loads a delimited sightings file, builds the per-vehicle
//! timeline and runs one analysis. Without a subcommand an interactive
//! menu is shown instead.
//!
//! Uses `indicatif-log-bridge` (via [`vehicle_trace_cli_utils::init_logger`])
//! so log lines and the co-location progress bar share the terminal.

mod commands;
mod config;
mod dataset;
mod error;
mod interactive;
mod render;

use std::path::PathBuf;
use std::time::Instant;

use chrono::{Datelike, Local, NaiveDate, Timelike};
use clap::{Parser, Subcommand};
use vehicle_trace_analytics_models::{AnalysisConfig, ResidenceConfig};
use vehicle_trace_cli_utils::MultiProgress;
use vehicle_trace_sighting_models::Weekday;

use crate::commands::OutputFormat;
use crate::config::CliConfig;
use crate::dataset::Dataset;
use crate::error::CliError;

#[derive(Parser)]
#[command(name = "vehicle_trace", about = "Vehicle sighting trajectory analysis")]
struct Cli {
    /// Delimited sightings file with plate, location, date and time columns
    #[arg(long, short, global = true)]
    input: Option<PathBuf>,
    /// TOML file with analysis thresholds and column aliases
    #[arg(long, env = "VEHICLE_TRACE_CONFIG", global = true)]
    config: Option<PathBuf>,
    /// Field delimiter: a single ASCII character, or "tab"
    #[arg(long, default_value = ",", value_parser = parse_delimiter, global = true)]
    delimiter: u8,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List every vehicle with its sighting count and date range
    Plates,
    /// List the dates a vehicle was seen on
    Dates {
        /// Vehicle plate
        plate: String,
    },
    /// Rank the locations a vehicle visits most
    Hotspots {
        /// Vehicle plate
        plate: String,
        /// Number of locations to show (overrides `[hotspots] limit`)
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Infer where a vehicle stays overnight
    Residence {
        /// Vehicle plate
        plate: String,
        /// Minimum stay in hours (overrides `[residence] min_stay_hours`)
        #[arg(long)]
        min_stay_hours: Option<f64>,
        /// Hour at which night begins (overrides `[residence] night_start_hour`)
        #[arg(long)]
        night_start: Option<u32>,
    },
    /// Show a vehicle's stops on one day
    Itinerary {
        /// Vehicle plate
        plate: String,
        /// Day to show (YYYY-MM-DD)
        date: NaiveDate,
        /// Long-stay alert in minutes (overrides `[itinerary] alert_minutes`)
        #[arg(long)]
        alert_minutes: Option<u32>,
    },
    /// Find vehicles seen at the same place at nearly the same time
    Convoy {
        /// Two or more vehicle plates
        #[arg(required = true, num_args = 2..)]
        plates: Vec<String>,
        /// Maximum time difference in seconds (overrides `[colocation] tolerance_seconds`)
        #[arg(long)]
        tolerance: Option<i64>,
    },
    /// Predict where a vehicle goes next from a location
    Predict {
        /// Vehicle plate
        plate: String,
        /// Current location
        location: String,
        /// Current hour, 0-23 (defaults to the local clock)
        #[arg(long)]
        hour: Option<u32>,
        /// Current day of week (defaults to today)
        #[arg(long, value_parser = parse_weekday)]
        weekday: Option<Weekday>,
    },
}

fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        _ => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii() => u8::try_from(c).map_err(|e| e.to_string()),
                _ => Err(format!("delimiter must be a single ASCII character, got {s:?}")),
            }
        }
    }
}

fn parse_weekday(s: &str) -> Result<Weekday, String> {
    s.parse()
        .map_err(|_| format!("unknown weekday {s:?} (expected e.g. \"monday\")"))
}

fn run_command(
    command: Commands,
    dataset: &Dataset,
    config: &AnalysisConfig,
    format: OutputFormat,
    multi: &MultiProgress,
) -> Result<(), CliError> {
    match command {
        Commands::Plates => commands::plates(dataset, format),
        Commands::Dates { plate } => commands::dates(dataset, &plate, format),
        Commands::Hotspots { plate, limit } => commands::hotspots(
            dataset,
            &plate,
            limit.unwrap_or(config.hotspots.limit),
            format,
        ),
        Commands::Residence {
            plate,
            min_stay_hours,
            night_start,
        } => commands::residence(
            dataset,
            &plate,
            &ResidenceConfig {
                min_stay_hours: min_stay_hours.unwrap_or(config.residence.min_stay_hours),
                night_start_hour: night_start.unwrap_or(config.residence.night_start_hour),
            },
            format,
        ),
        Commands::Itinerary {
            plate,
            date,
            alert_minutes,
        } => commands::itinerary(
            dataset,
            &plate,
            date,
            alert_minutes.unwrap_or(config.itinerary.alert_minutes),
            format,
        ),
        Commands::Convoy { plates, tolerance } => commands::convoy(
            dataset,
            &plates,
            tolerance.unwrap_or(config.colocation.tolerance_seconds),
            multi,
            format,
        ),
        Commands::Predict {
            plate,
            location,
            hour,
            weekday,
        } => {
            let now = Local::now();
            commands::predict(
                dataset,
                &plate,
                &location,
                hour.unwrap_or_else(|| now.hour()),
                weekday.unwrap_or_else(|| Weekday::from(now.weekday())),
                &config.prediction,
                format,
            )
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = vehicle_trace_cli_utils::init_logger();
    let cli = Cli::parse();

    let config = CliConfig::load(cli.config.as_deref())?;

    let Some(command) = cli.command else {
        println!("Vehicle Trace");
        interactive::run(&multi, cli.input, cli.delimiter, &config)?;
        return Ok(());
    };

    let input = cli
        .input
        .ok_or_else(|| CliError::Usage("--input is required".to_string()))?;

    let start = Instant::now();
    let dataset = Dataset::load(&input, cli.delimiter, &config)?;
    run_command(command, &dataset, &config.analysis, cli.format, &multi)?;
    log::debug!("Finished in {:.2?}", start.elapsed());

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn delimiters() {
        assert_eq!(parse_delimiter(","), Ok(b','));
        assert_eq!(parse_delimiter(";"), Ok(b';'));
        assert_eq!(parse_delimiter("tab"), Ok(b'\t'));
        assert!(parse_delimiter(",,").is_err());
        assert!(parse_delimiter("").is_err());
        assert!(parse_delimiter("\u{3001}").is_err());
    }

    #[test]
    fn weekday_names_are_case_insensitive() {
        assert_eq!(parse_weekday("Friday"), Ok(Weekday::Friday));
        assert!(parse_weekday("someday").is_err());
    }

    #[test]
    fn convoy_needs_two_plates() {
        assert!(Cli::try_parse_from(["vehicle_trace", "convoy", "A"]).is_err());
        let cli = Cli::try_parse_from(["vehicle_trace", "-i", "s.csv", "convoy", "A", "B"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Convoy { ref plates, .. }) if plates.len() == 2));
    }

    #[test]
    fn itinerary_date_is_parsed() {
        let cli = Cli::try_parse_from([
            "vehicle_trace",
            "itinerary",
            "ABC123",
            "2024-01-15",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(matches!(
            cli.command,
            Some(Commands::Itinerary { date, .. }) if date == NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        ));
    }
}
