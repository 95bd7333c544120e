//! Runs one analysis against a loaded dataset and prints the result.
//!
//! Shared by the subcommands and the interactive menu.

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::Serialize;
use vehicle_trace_analytics::{
    classify_residence, daily_itinerary, match_colocations, predict_next, rank_hotspots,
    require_plate, summarize_plates,
};
use vehicle_trace_analytics_models::{PredictionConfig, ResidenceConfig};
use vehicle_trace_cli_utils::{IndicatifProgress, MultiProgress};
use vehicle_trace_sighting_models::Weekday;

use crate::dataset::Dataset;
use crate::error::CliError;
use crate::render;

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables.
    Text,
    /// Pretty-printed JSON.
    Json,
}

fn emit<T: Serialize + ?Sized>(
    format: OutputFormat,
    value: &T,
    text: impl FnOnce(&T) -> String,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Text => println!("{}", text(value)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
    }
    Ok(())
}

/// Every plate with its sighting count and date range.
///
/// # Errors
///
/// Returns [`CliError::Json`] if JSON output fails.
pub fn plates(dataset: &Dataset, format: OutputFormat) -> Result<(), CliError> {
    let summaries = summarize_plates(&dataset.timeline);
    emit(format, summaries.as_slice(), render::plates)
}

/// Distinct dates `plate` was seen on.
///
/// # Errors
///
/// Returns [`CliError::Analytics`] if the plate is empty.
pub fn dates(dataset: &Dataset, plate: &str, format: OutputFormat) -> Result<(), CliError> {
    let plate = require_plate(plate)?;
    dataset.warn_if_unknown(plate);
    let dates = dataset.timeline.dates_for_plate(plate);
    emit(format, dates.as_slice(), |d| render::dates(plate, d))
}

/// Most-visited locations for `plate`.
///
/// # Errors
///
/// Returns [`CliError::Analytics`] if the plate is empty.
pub fn hotspots(
    dataset: &Dataset,
    plate: &str,
    limit: usize,
    format: OutputFormat,
) -> Result<(), CliError> {
    let plate = require_plate(plate)?;
    dataset.warn_if_unknown(plate);
    let ranked = rank_hotspots(dataset.timeline.for_plate(plate), limit);
    emit(format, ranked.as_slice(), render::hotspots)
}

/// Overnight residence candidates for `plate`.
///
/// # Errors
///
/// Returns [`CliError::Analytics`] if the plate is empty or the thresholds
/// are invalid.
pub fn residence(
    dataset: &Dataset,
    plate: &str,
    config: &ResidenceConfig,
    format: OutputFormat,
) -> Result<(), CliError> {
    let plate = require_plate(plate)?;
    dataset.warn_if_unknown(plate);
    let candidates = classify_residence(
        dataset.timeline.for_plate(plate),
        config.min_stay_hours,
        config.night_start_hour,
    )?;
    emit(format, candidates.as_slice(), render::residence)
}

/// Stops `plate` made on `date`.
///
/// # Errors
///
/// Returns [`CliError::Analytics`] if the plate is empty.
pub fn itinerary(
    dataset: &Dataset,
    plate: &str,
    date: NaiveDate,
    alert_minutes: u32,
    format: OutputFormat,
) -> Result<(), CliError> {
    let plate = require_plate(plate)?;
    dataset.warn_if_unknown(plate);
    let stops = daily_itinerary(dataset.timeline.for_plate(plate), date, alert_minutes);
    emit(format, stops.as_slice(), |s| render::itinerary(plate, date, s))
}

/// Sightings of two or more vehicles at the same place and time.
///
/// # Errors
///
/// Returns [`CliError::Analytics`] if fewer than two distinct plates are
/// given or the tolerance is negative.
pub fn convoy(
    dataset: &Dataset,
    plates: &[String],
    tolerance_seconds: i64,
    multi: &MultiProgress,
    format: OutputFormat,
) -> Result<(), CliError> {
    for plate in plates {
        dataset.warn_if_unknown(plate);
    }
    let progress = IndicatifProgress::steps_bar(multi, "Matching pairs");
    let matches = match_colocations(&dataset.sightings, plates, tolerance_seconds, &progress)?;
    emit(format, matches.as_slice(), render::colocations)
}

/// Likely next stops and trip destinations for `plate` at `location`.
///
/// # Errors
///
/// Returns [`CliError::Analytics`] if the plate or location is empty or
/// the hour is out of range.
pub fn predict(
    dataset: &Dataset,
    plate: &str,
    location: &str,
    hour: u32,
    weekday: Weekday,
    config: &PredictionConfig,
    format: OutputFormat,
) -> Result<(), CliError> {
    let plate = plate.trim();
    let location = location.trim();
    dataset.warn_if_unknown(plate);
    let prediction = predict_next(&dataset.timeline, plate, location, hour, weekday, config)?;
    emit(format, &prediction, |p| render::prediction(plate, location, p))
}
