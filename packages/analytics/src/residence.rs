//! Overnight residence inference.
//!
//! A vehicle that repeatedly arrives somewhere late at night and is not
//! seen again for hours most likely parks there overnight. Each such
//! arrival is a candidate; locations are ranked by candidate count.

use chrono::Timelike as _;
use vehicle_trace_analytics_models::{ResidenceCandidate, TimelineEntry};

use crate::AnalyticsError;

/// Hour (exclusive) at which the night window closes.
pub const NIGHT_END_HOUR: u32 = 6;

/// Whether `entry` is a night arrival followed by a long stay.
///
/// An entry without a dwell (the vehicle's last sighting) never qualifies.
#[must_use]
pub fn is_night_long_stay(entry: &TimelineEntry, min_stay_seconds: f64, night_start_hour: u32) -> bool {
    let Some(dwell) = entry.dwell_seconds else {
        return false;
    };
    let hour = entry.timestamp.hour();
    let is_night = hour >= night_start_hour || hour < NIGHT_END_HOUR;
    #[allow(clippy::cast_precision_loss)]
    let dwell = dwell as f64;
    is_night && dwell >= min_stay_seconds
}

/// Ranks likely overnight locations for one vehicle's timeline entries.
///
/// Locations are ordered by qualifying-stay count, descending; ties keep
/// the order in which the locations first qualified. The first candidate
/// is the inferred residence. An empty result means nothing qualified.
///
/// # Errors
///
/// Returns [`AnalyticsError::Precondition`] if `min_stay_hours` is not a
/// positive finite number or `night_start_hour` is greater than 24.
pub fn classify_residence(
    entries: &[TimelineEntry],
    min_stay_hours: f64,
    night_start_hour: u32,
) -> Result<Vec<ResidenceCandidate>, AnalyticsError> {
    if !min_stay_hours.is_finite() || min_stay_hours <= 0.0 {
        return Err(AnalyticsError::precondition(format!(
            "minimum stay must be a positive number of hours, got {min_stay_hours}"
        )));
    }
    if night_start_hour > 24 {
        return Err(AnalyticsError::precondition(format!(
            "night start hour must be between 0 and 24, got {night_start_hour}"
        )));
    }

    let min_stay_seconds = min_stay_hours * 3600.0;
    let mut candidates: Vec<ResidenceCandidate> = Vec::new();

    for entry in entries
        .iter()
        .filter(|e| is_night_long_stay(e, min_stay_seconds, night_start_hour))
    {
        if let Some(candidate) = candidates.iter_mut().find(|c| c.location == entry.location) {
            candidate.count += 1;
            candidate.stays.push(entry.clone());
        } else {
            candidates.push(ResidenceCandidate {
                location: entry.location.clone(),
                count: 1,
                stays: vec![entry.clone()],
            });
        }
    }

    // stable: ties stay in first-qualified order
    candidates.sort_by(|a, b| b.count.cmp(&a.count));

    if let Some(top) = candidates.first() {
        log::debug!(
            "Inferred residence {:?} ({} night stay(s), {} candidate location(s))",
            top.location,
            top.count,
            candidates.len()
        );
    }

    Ok(candidates)
}
