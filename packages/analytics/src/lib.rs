#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Trajectory derivation and association engine for vehicle sightings.
//!
//! [`timeline::build_timelines`] turns an unordered set of sightings into
//! per-vehicle, time-ordered entries linked to their next sighting and
//! grouped into trips. Every other analysis reads that timeline (or the
//! raw sightings, for co-location) and returns fresh result values; nothing
//! here mutates its input or keeps state between calls.

pub mod anomaly;
pub mod colocation;
pub mod hotspots;
pub mod itinerary;
pub mod prediction;
pub mod progress;
pub mod residence;
pub mod summary;
pub mod timeline;

use thiserror::Error;

pub use anomaly::tag_anomaly;
pub use colocation::match_colocations;
pub use hotspots::rank_hotspots;
pub use itinerary::daily_itinerary;
pub use prediction::predict_next;
pub use residence::classify_residence;
pub use summary::summarize_plates;
pub use timeline::{Timeline, build_timelines};

/// Errors that can occur during analytics operations.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// The request was rejected before any computation ran.
    #[error("Precondition failed: {message}")]
    Precondition {
        /// Description of what went wrong.
        message: String,
    },
}

impl AnalyticsError {
    pub(crate) fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition {
            message: message.into(),
        }
    }
}

/// Trims `plate`, rejecting it if nothing is left.
///
/// Every per-vehicle view runs its plate through this before looking the
/// vehicle up.
///
/// # Errors
///
/// Returns [`AnalyticsError::Precondition`] for an empty or whitespace-only
/// plate.
pub fn require_plate(plate: &str) -> Result<&str, AnalyticsError> {
    let plate = plate.trim();
    if plate.is_empty() {
        return Err(AnalyticsError::precondition("a plate is required"));
    }
    Ok(plate)
}
