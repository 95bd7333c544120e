//! TOML configuration for the CLI.
//!
//! Every key is optional. A file might look like:
//!
//! ```toml
//! [trip]
//! long_stay_seconds = 1800
//! break_gap_seconds = 14400
//!
//! [residence]
//! min_stay_hours = 6.0
//!
//! [aliases]
//! plate = ["reg_no"]
//! ```

use std::path::Path;

use serde::Deserialize;
use vehicle_trace_analytics_models::AnalysisConfig;
use vehicle_trace_sighting::aliases::{AliasOverrides, FieldAliases};

use crate::error::CliError;

/// Analysis thresholds plus extra column aliases.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Per-analysis thresholds (`[trip]`, `[prediction]`, ...).
    #[serde(flatten)]
    pub analysis: AnalysisConfig,
    /// Extra header spellings (`[aliases]`).
    pub aliases: AliasOverrides,
}

impl CliConfig {
    /// Parses a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns the TOML error if the text is malformed or a value has the
    /// wrong type.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Loads the config at `path`, or the defaults when no path is given.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::ConfigRead`] or [`CliError::ConfigParse`] if the
    /// file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, CliError> {
        let Some(path) = path else {
            log::debug!("No config file given; using defaults");
            return Ok(Self::default());
        };

        let text = std::fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&text).map_err(|source| CliError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;

        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Built-in column aliases extended with the configured ones.
    #[must_use]
    pub fn field_aliases(&self) -> FieldAliases {
        FieldAliases::builtin().with_overrides(&self.aliases)
    }
}

#[cfg(test)]
mod tests {
    use vehicle_trace_sighting_models::CanonicalField;

    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        let config = CliConfig::from_toml("").unwrap();
        assert_eq!(config.analysis, AnalysisConfig::default());
        assert!(config.aliases.plate.is_empty());
    }

    #[test]
    fn sections_override_only_what_they_name() {
        let config = CliConfig::from_toml(
            r#"
            [trip]
            long_stay_seconds = 900

            [residence]
            min_stay_hours = 6.0

            [hotspots]
            limit = 5

            [aliases]
            plate = ["reg_no"]
            "#,
        )
        .unwrap();

        assert_eq!(config.analysis.trip.long_stay_seconds, 900);
        assert_eq!(config.analysis.trip.break_gap_seconds, 14_400);
        assert!((config.analysis.residence.min_stay_hours - 6.0).abs() < f64::EPSILON);
        assert_eq!(config.analysis.residence.night_start_hour, 20);
        assert_eq!(config.analysis.hotspots.limit, 5);
        assert_eq!(config.analysis.prediction.hour_window, 3);
        assert_eq!(
            config.field_aliases().field_for("REG_NO"),
            Some(CanonicalField::Plate)
        );
    }

    #[test]
    fn wrong_value_type_is_an_error() {
        assert!(CliConfig::from_toml("[trip]\nlong_stay_seconds = \"long\"\n").is_err());
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = CliConfig::load(Some(Path::new("/nonexistent/vehicle_trace.toml"))).unwrap_err();
        assert!(matches!(err, CliError::ConfigRead { .. }));
    }

    #[test]
    fn no_path_means_defaults() {
        let config = CliConfig::load(None).unwrap();
        assert_eq!(config.analysis, AnalysisConfig::default());
    }
}
