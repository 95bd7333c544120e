//! Multi-vehicle co-location ("convoy") matching.
//!
//! For every unordered pair of selected vehicles, sightings are joined on
//! exact location equality and kept when their timestamps are within the
//! tolerance. Each vehicle's sightings are bucketed by location once up
//! front, so each pair only compares sightings that share a location.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use vehicle_trace_analytics_models::ColocationMatch;
use vehicle_trace_sighting_models::Sighting;

use crate::AnalyticsError;
use crate::progress::ProgressCallback;

type LocationIndex<'a> = HashMap<&'a str, Vec<&'a Sighting>>;

/// Finds every pair of sightings of two different selected vehicles at the
/// same location within `tolerance_seconds` of each other.
///
/// `plates` are trimmed and de-duplicated; pairs are processed in selection
/// order. Matches are sorted by vehicle A's timestamp, newest first.
/// Progress advances by one per completed pair.
///
/// # Errors
///
/// Returns [`AnalyticsError::Precondition`] if fewer than two distinct
/// plates are selected, a selected plate is empty, or the tolerance is
/// negative.
pub fn match_colocations<S: AsRef<str>>(
    sightings: &[Sighting],
    plates: &[S],
    tolerance_seconds: i64,
    progress: &Arc<dyn ProgressCallback>,
) -> Result<Vec<ColocationMatch>, AnalyticsError> {
    let selected = match validate(plates, tolerance_seconds) {
        Ok(selected) => selected,
        Err(e) => {
            progress.finish_and_clear();
            return Err(e);
        }
    };

    let mut by_plate: BTreeMap<&str, Vec<&Sighting>> =
        selected.iter().map(|p| (*p, Vec::new())).collect();
    for sighting in sightings {
        if let Some(list) = by_plate.get_mut(sighting.plate.as_str()) {
            list.push(sighting);
        }
    }
    for (plate, list) in &by_plate {
        if list.is_empty() {
            log::warn!("Plate {plate:?} has no sightings; it cannot match anything");
        }
    }

    let indexes: BTreeMap<&str, LocationIndex<'_>> = by_plate
        .iter()
        .map(|(plate, list)| (*plate, index_by_location(list)))
        .collect();

    let pair_count = selected.len() * (selected.len() - 1) / 2;
    progress.set_total(pair_count as u64);

    let mut matches = Vec::new();

    for (i, plate_a) in selected.iter().enumerate() {
        for plate_b in &selected[i + 1..] {
            progress.set_message(format!("{plate_a} \u{2194} {plate_b}"));

            let before = matches.len();
            match_pair(
                &by_plate[plate_a],
                &indexes[plate_b],
                tolerance_seconds,
                &mut matches,
            );
            log::debug!(
                "{plate_a} / {plate_b}: {} match(es)",
                matches.len() - before
            );

            progress.inc(1);
        }
    }

    matches.sort_by(|a, b| b.timestamp_a.cmp(&a.timestamp_a));

    log::info!(
        "Co-location: {} match(es) across {pair_count} pair(s) within {tolerance_seconds}s",
        matches.len()
    );
    progress.finish(format!("{} co-location match(es)", matches.len()));

    Ok(matches)
}

fn validate<S: AsRef<str>>(
    plates: &[S],
    tolerance_seconds: i64,
) -> Result<Vec<&str>, AnalyticsError> {
    if tolerance_seconds < 0 {
        return Err(AnalyticsError::precondition(format!(
            "tolerance must be non-negative, got {tolerance_seconds}s"
        )));
    }

    let mut selected: Vec<&str> = Vec::with_capacity(plates.len());
    for plate in plates {
        let plate = crate::require_plate(plate.as_ref())?;
        if !selected.contains(&plate) {
            selected.push(plate);
        }
    }
    if selected.len() < 2 {
        return Err(AnalyticsError::precondition(format!(
            "co-location needs at least two distinct plates, got {}",
            selected.len()
        )));
    }

    Ok(selected)
}

fn index_by_location<'a>(sightings: &[&'a Sighting]) -> LocationIndex<'a> {
    let mut index: LocationIndex<'a> = HashMap::new();
    for sighting in sightings {
        index
            .entry(sighting.location.as_str())
            .or_default()
            .push(sighting);
    }
    index
}

fn match_pair(
    sightings_a: &[&Sighting],
    index_b: &LocationIndex<'_>,
    tolerance_seconds: i64,
    out: &mut Vec<ColocationMatch>,
) {
    for a in sightings_a {
        let Some(candidates) = index_b.get(a.location.as_str()) else {
            continue;
        };
        for b in candidates {
            let diff_seconds = (a.timestamp - b.timestamp).num_seconds().abs();
            if diff_seconds <= tolerance_seconds {
                out.push(ColocationMatch {
                    location: a.location.clone(),
                    date: a.date(),
                    plate_a: a.plate.clone(),
                    timestamp_a: a.timestamp,
                    plate_b: b.plate.clone(),
                    timestamp_b: b.timestamp,
                    diff_seconds,
                });
            }
        }
    }
}
