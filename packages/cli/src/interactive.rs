#![allow(clippy::module_name_repetitions)]

//! Interactive menu for exploring a sightings file.
//!
//! Loads the dataset once, then lets the user pick an analysis, a vehicle
//! and the analysis' parameters from `dialoguer` prompts until they quit.

use std::path::PathBuf;

use chrono::{Datelike, Local, Timelike};
use dialoguer::{Input, MultiSelect, Select};
use strum::IntoEnumIterator;
use vehicle_trace_analytics::rank_hotspots;
use vehicle_trace_analytics_models::{AnalysisConfig, ResidenceConfig};
use vehicle_trace_cli_utils::MultiProgress;
use vehicle_trace_sighting_models::Weekday;

use crate::commands::{self, OutputFormat};
use crate::config::CliConfig;
use crate::dataset::Dataset;
use crate::error::CliError;

/// Actions offered by the main menu.
enum Action {
    Plates,
    Dates,
    Hotspots,
    Residence,
    Itinerary,
    Convoy,
    Predict,
    Quit,
}

impl Action {
    const ALL: &[Self] = &[
        Self::Plates,
        Self::Dates,
        Self::Hotspots,
        Self::Residence,
        Self::Itinerary,
        Self::Convoy,
        Self::Predict,
        Self::Quit,
    ];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::Plates => "List vehicles",
            Self::Dates => "Dates a vehicle was seen",
            Self::Hotspots => "Most-visited locations",
            Self::Residence => "Infer overnight residence",
            Self::Itinerary => "Daily itinerary",
            Self::Convoy => "Vehicles travelling together",
            Self::Predict => "Predict next stop",
            Self::Quit => "Quit",
        }
    }
}

/// Runs the menu loop.
///
/// Prompts for the input file when `input` is `None`.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded or a prompt fails.
/// Errors from an individual analysis are logged and the menu continues.
pub fn run(
    multi: &MultiProgress,
    input: Option<PathBuf>,
    delimiter: u8,
    config: &CliConfig,
) -> Result<(), CliError> {
    let input = match input {
        Some(path) => path,
        None => {
            let path: String = Input::new()
                .with_prompt("Sightings file (CSV/TSV)")
                .interact_text()?;
            PathBuf::from(path.trim())
        }
    };

    let dataset = Dataset::load(&input, delimiter, config)?;
    if dataset.timeline.is_empty() {
        println!("The file contains no sightings.");
        return Ok(());
    }

    let labels: Vec<&str> = Action::ALL.iter().map(Action::label).collect();

    loop {
        println!();
        let idx = Select::new()
            .with_prompt("What would you like to do?")
            .items(&labels)
            .default(0)
            .interact()?;

        let result = match Action::ALL[idx] {
            Action::Quit => return Ok(()),
            Action::Plates => commands::plates(&dataset, OutputFormat::Text),
            Action::Dates => {
                let plate = select_plate(&dataset)?;
                commands::dates(&dataset, &plate, OutputFormat::Text)
            }
            Action::Hotspots => {
                let plate = select_plate(&dataset)?;
                commands::hotspots(
                    &dataset,
                    &plate,
                    config.analysis.hotspots.limit,
                    OutputFormat::Text,
                )
            }
            Action::Residence => residence_interactive(&dataset, &config.analysis),
            Action::Itinerary => itinerary_interactive(&dataset, &config.analysis),
            Action::Convoy => convoy_interactive(multi, &dataset, &config.analysis),
            Action::Predict => predict_interactive(&dataset, &config.analysis),
        };

        match result {
            Ok(()) => {}
            Err(CliError::Prompt(e)) => return Err(CliError::Prompt(e)),
            Err(e) => log::error!("{e}"),
        }
    }
}

fn select_plate(dataset: &Dataset) -> Result<String, CliError> {
    let plates = dataset.timeline.plates();
    let idx = Select::new()
        .with_prompt("Vehicle")
        .items(&plates)
        .default(0)
        .max_length(20)
        .interact()?;
    Ok(plates[idx].to_string())
}

fn residence_interactive(dataset: &Dataset, config: &AnalysisConfig) -> Result<(), CliError> {
    let plate = select_plate(dataset)?;

    let min_stay_hours: f64 = Input::new()
        .with_prompt("Minimum stay (hours)")
        .default(config.residence.min_stay_hours)
        .interact_text()?;
    let night_start_hour: u32 = Input::new()
        .with_prompt("Night starts at hour")
        .default(config.residence.night_start_hour)
        .interact_text()?;

    commands::residence(
        dataset,
        &plate,
        &ResidenceConfig {
            min_stay_hours,
            night_start_hour,
        },
        OutputFormat::Text,
    )
}

fn itinerary_interactive(dataset: &Dataset, config: &AnalysisConfig) -> Result<(), CliError> {
    let plate = select_plate(dataset)?;

    let dates = dataset.timeline.dates_for_plate(&plate);
    let date_labels: Vec<String> = dates
        .iter()
        .map(|d| d.format("%Y-%m-%d (%A)").to_string())
        .collect();
    let idx = Select::new()
        .with_prompt("Date")
        .items(&date_labels)
        .default(0)
        .max_length(20)
        .interact()?;

    commands::itinerary(
        dataset,
        &plate,
        dates[idx],
        config.itinerary.alert_minutes,
        OutputFormat::Text,
    )
}

fn convoy_interactive(
    multi: &MultiProgress,
    dataset: &Dataset,
    config: &AnalysisConfig,
) -> Result<(), CliError> {
    let plates = dataset.timeline.plates();
    let selected = MultiSelect::new()
        .with_prompt("Vehicles to compare (space=toggle, enter=confirm)")
        .items(&plates)
        .max_length(20)
        .interact()?;

    let chosen: Vec<String> = selected.iter().map(|&i| plates[i].to_string()).collect();

    let tolerance_seconds: i64 = Input::new()
        .with_prompt("Time tolerance (seconds)")
        .default(config.colocation.tolerance_seconds)
        .interact_text()?;

    commands::convoy(
        dataset,
        &chosen,
        tolerance_seconds,
        multi,
        OutputFormat::Text,
    )
}

fn predict_interactive(dataset: &Dataset, config: &AnalysisConfig) -> Result<(), CliError> {
    let plate = select_plate(dataset)?;

    // Offer the vehicle's locations, most visited first.
    let locations: Vec<String> = rank_hotspots(dataset.timeline.for_plate(&plate), usize::MAX)
        .into_iter()
        .map(|h| h.location)
        .collect();
    let idx = Select::new()
        .with_prompt("Current location")
        .items(&locations)
        .default(0)
        .max_length(20)
        .interact()?;

    let now = Local::now();
    let hour: u32 = Input::new()
        .with_prompt("Current hour (0-23)")
        .default(now.hour())
        .interact_text()?;

    let weekdays: Vec<Weekday> = Weekday::iter().collect();
    let weekday_labels: Vec<&str> = weekdays.iter().map(|w| w.label()).collect();
    let today = Weekday::from(now.weekday());
    let weekday_idx = Select::new()
        .with_prompt("Day of week")
        .items(&weekday_labels)
        .default(weekdays.iter().position(|w| *w == today).unwrap_or(0))
        .interact()?;

    commands::predict(
        dataset,
        &plate,
        &locations[idx],
        hour,
        weekdays[weekday_idx],
        &config.prediction,
        OutputFormat::Text,
    )
}
