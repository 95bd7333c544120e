//! Dwell anomaly tagging.

use vehicle_trace_analytics_models::{DwellState, TimelineEntry};

/// Classifies an entry's dwell against `alert_minutes`.
///
/// Dwell is compared in whole minutes (truncated), so 59m59s never trips a
/// 60-minute alert. The vehicle's last entry has no dwell and is reported
/// as [`DwellState::EndOfRecord`].
#[must_use]
pub fn tag_anomaly(entry: &TimelineEntry, alert_minutes: u32) -> DwellState {
    classify_dwell(entry.dwell_seconds, alert_minutes)
}

/// [`tag_anomaly`] over a bare dwell value.
#[must_use]
pub fn classify_dwell(dwell_seconds: Option<i64>, alert_minutes: u32) -> DwellState {
    match dwell_seconds {
        None => DwellState::EndOfRecord,
        Some(secs) if secs / 60 >= i64::from(alert_minutes) => DwellState::AnomalousLongDwell,
        Some(_) => DwellState::Normal,
    }
}
