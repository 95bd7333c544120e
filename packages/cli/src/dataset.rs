//! Loads a sightings file into an analysis-ready timeline.

use std::path::Path;

use vehicle_trace_analytics::{Timeline, build_timelines};
use vehicle_trace_sighting::{RawTable, normalize};
use vehicle_trace_sighting_models::Sighting;

use crate::config::CliConfig;
use crate::error::CliError;

/// Normalized sightings together with the timeline built from them.
pub struct Dataset {
    /// De-duplicated sightings, in file order.
    pub sightings: Vec<Sighting>,
    /// Per-vehicle timeline built with the configured trip thresholds.
    pub timeline: Timeline,
}

impl Dataset {
    /// Reads and normalizes the delimited file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Normalize`] if the file cannot be decoded, a
    /// required column is missing, or a row fails to parse.
    pub fn load(path: &Path, delimiter: u8, config: &CliConfig) -> Result<Self, CliError> {
        log::info!("Reading sightings from {}", path.display());
        let table = RawTable::from_csv_path(path, delimiter)?;
        Self::from_table(&table, config)
    }

    /// Normalizes an already-decoded table.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Normalize`] if a required column is missing or a
    /// row fails to parse.
    pub fn from_table(table: &RawTable, config: &CliConfig) -> Result<Self, CliError> {
        let batch = normalize(table, &config.field_aliases())?;
        let timeline = build_timelines(&batch.sightings, &config.analysis.trip);

        log::info!(
            "{} sighting(s) ({} duplicate(s) dropped), {} vehicle(s), {} trip(s)",
            timeline.len(),
            batch.duplicates_removed,
            timeline.plates().len(),
            timeline.trip_count()
        );

        Ok(Self {
            sightings: batch.sightings,
            timeline,
        })
    }

    /// Warns when `plate` has no sightings. Analyses still run and simply
    /// return empty results.
    pub fn warn_if_unknown(&self, plate: &str) {
        let plate = plate.trim();
        if !plate.is_empty() && !self.timeline.contains_plate(plate) {
            log::warn!("No sightings for plate {plate:?}");
        }
    }
}
