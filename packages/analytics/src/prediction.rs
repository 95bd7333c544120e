//! Next-stop and final-destination prediction.
//!
//! Every past visit by the vehicle to the reference location is an anchor.
//! Anchors that look like "now" (same weekday, similar hour) are preferred;
//! when there are too few of them the conditioning is relaxed to hour only
//! and finally to every visit. Within each anchor's trip the following
//! sighting is a next-stop sample and the trip's last sighting is a
//! final-destination sample.

use chrono::Timelike as _;
use vehicle_trace_analytics_models::{
    Prediction, PredictionConfig, PredictionTier, RankedDestination, TimelineEntry,
};
use vehicle_trace_sighting_models::Weekday;

use crate::AnalyticsError;
use crate::timeline::Timeline;

/// Predicts where `plate` goes next after being seen at `location`.
///
/// Probabilities are percentages rounded to one decimal. Both rankings
/// are sorted by probability descending, then by mean elapsed time
/// ascending. A vehicle that never visited `location` gets an
/// [`PredictionTier::AllVisits`] prediction with zero anchors and empty
/// rankings.
///
/// # Errors
///
/// Returns [`AnalyticsError::Precondition`] if `plate` or `location` is
/// empty or `now_hour` is not in 0-23.
pub fn predict_next(
    timeline: &Timeline,
    plate: &str,
    location: &str,
    now_hour: u32,
    now_weekday: Weekday,
    config: &PredictionConfig,
) -> Result<Prediction, AnalyticsError> {
    let plate = crate::require_plate(plate)?;
    let location = location.trim();
    if location.is_empty() {
        return Err(AnalyticsError::precondition("a reference location is required"));
    }
    if now_hour > 23 {
        return Err(AnalyticsError::precondition(format!(
            "hour must be between 0 and 23, got {now_hour}"
        )));
    }

    let anchors: Vec<&TimelineEntry> = timeline
        .for_plate(plate)
        .iter()
        .filter(|e| e.location == location)
        .collect();

    let (tier, selected) = select_tier(&anchors, now_hour, now_weekday, config);

    log::debug!(
        "{plate} @ {location:?}: {} anchor(s), using {tier} ({} anchor(s))",
        anchors.len(),
        selected.len()
    );

    let mut next_samples: Vec<(&str, i64)> = Vec::new();
    let mut final_samples: Vec<(&str, i64)> = Vec::new();

    for anchor in &selected {
        let trip = timeline.trip(anchor.trip_id);
        let Some(pos) = trip.iter().position(|e| std::ptr::eq(e, *anchor)) else {
            continue;
        };

        if let Some(next) = trip.get(pos + 1) {
            next_samples.push((
                next.location.as_str(),
                (next.timestamp - anchor.timestamp).num_seconds(),
            ));
        }

        if let Some(last) = trip.last()
            && last.location != location
        {
            final_samples.push((
                last.location.as_str(),
                (last.timestamp - anchor.timestamp).num_seconds(),
            ));
        }
    }

    Ok(Prediction {
        tier,
        anchor_count: selected.len(),
        next_stops: rank_destinations(&next_samples),
        final_destinations: rank_destinations(&final_samples),
    })
}

/// Picks the most specific anchor subset with at least
/// `config.min_tier_samples` members, falling back to all anchors.
fn select_tier<'a>(
    anchors: &[&'a TimelineEntry],
    now_hour: u32,
    now_weekday: Weekday,
    config: &PredictionConfig,
) -> (PredictionTier, Vec<&'a TimelineEntry>) {
    let near_hour = |e: &TimelineEntry| e.timestamp.hour().abs_diff(now_hour) <= config.hour_window;

    let same_weekday: Vec<&TimelineEntry> = anchors
        .iter()
        .copied()
        .filter(|e| e.weekday == now_weekday && near_hour(*e))
        .collect();
    if same_weekday.len() >= config.min_tier_samples {
        return (PredictionTier::WeekdayAndHour, same_weekday);
    }

    let any_weekday: Vec<&TimelineEntry> =
        anchors.iter().copied().filter(|e| near_hour(*e)).collect();
    if any_weekday.len() >= config.min_tier_samples {
        return (PredictionTier::HourWindow, any_weekday);
    }

    (PredictionTier::AllVisits, anchors.to_vec())
}

fn rank_destinations(samples: &[(&str, i64)]) -> Vec<RankedDestination> {
    let mut groups: Vec<(&str, usize, i64)> = Vec::new();
    for (location, elapsed) in samples {
        if let Some(group) = groups.iter_mut().find(|g| g.0 == *location) {
            group.1 += 1;
            group.2 += elapsed;
        } else {
            groups.push((*location, 1, *elapsed));
        }
    }

    #[allow(clippy::cast_precision_loss)]
    let total = samples.len() as f64;

    let mut ranked: Vec<RankedDestination> = groups
        .into_iter()
        .map(|(location, count, elapsed_sum)| {
            #[allow(clippy::cast_precision_loss)]
            let count_f = count as f64;
            #[allow(clippy::cast_precision_loss)]
            let mean_elapsed_seconds = elapsed_sum as f64 / count_f;
            RankedDestination {
                location: location.to_string(),
                count,
                mean_elapsed_seconds,
                probability: round_one_decimal(count_f / total * 100.0),
            }
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.probability
            .total_cmp(&a.probability)
            .then_with(|| a.mean_elapsed_seconds.total_cmp(&b.mean_elapsed_seconds))
            .then_with(|| a.location.cmp(&b.location))
    });

    ranked
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
