//! Errors surfaced by the `vehicle_trace` binary.

use std::path::PathBuf;

use thiserror::Error;
use vehicle_trace_analytics::AnalyticsError;
use vehicle_trace_sighting::NormalizeError;

/// Anything that can stop a CLI run.
#[derive(Debug, Error)]
pub enum CliError {
    /// The config file could not be read.
    #[error("Failed to read config {}: {source}", .path.display())]
    ConfigRead {
        /// Config path.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`crate::config::CliConfig`].
    #[error("Invalid config {}: {source}", .path.display())]
    ConfigParse {
        /// Config path.
        path: PathBuf,
        /// Underlying error.
        source: toml::de::Error,
    },

    /// The input file could not be decoded or normalized.
    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    /// An analysis rejected its arguments.
    #[error(transparent)]
    Analytics(#[from] AnalyticsError),

    /// JSON output failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An interactive prompt failed.
    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    /// Invalid command-line usage.
    #[error("{0}")]
    Usage(String),
}
