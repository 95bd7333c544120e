//! Plain-text rendering of analysis results.

use chrono::{NaiveDate, NaiveDateTime};
use vehicle_trace_analytics_models::{
    ColocationMatch, DwellState, Hotspot, ItineraryStop, PlateSummary, Prediction,
    RankedDestination, ResidenceCandidate, TimelineEntry,
};

const TIMESTAMP: &str = "%Y-%m-%d %H:%M:%S";
const CLOCK: &str = "%H:%M:%S";

/// Formats a duration as `"2h 5m"`, or `"45m"` under an hour.
#[must_use]
pub fn format_duration(seconds: i64) -> String {
    let minutes = seconds / 60;
    let hours = minutes / 60;
    if hours > 0 {
        format!("{hours}h {}m", minutes % 60)
    } else {
        format!("{minutes}m")
    }
}

/// Formats a departure clock time, suffixed with `(+Nd)` when it falls on
/// a later day than the arrival.
#[must_use]
pub fn format_departure(departure: Option<NaiveDateTime>, day_offset: Option<i64>) -> String {
    match (departure, day_offset) {
        (Some(at), Some(days)) if days > 0 => format!("{} (+{days}d)", at.format(CLOCK)),
        (Some(at), _) => at.format(CLOCK).to_string(),
        (None, _) => "-".to_string(),
    }
}

fn stay(entry: &TimelineEntry) -> String {
    entry
        .dwell_seconds
        .map_or_else(|| "-".to_string(), format_duration)
}

/// One line per plate.
#[must_use]
pub fn plates(summaries: &[PlateSummary]) -> String {
    if summaries.is_empty() {
        return "No sightings.".to_string();
    }

    let mut lines = vec![format!(
        "{:<14} {:>9} {:>9}  {:<19}  {:<19}",
        "PLATE", "SIGHTINGS", "LOCATIONS", "FIRST SEEN", "LAST SEEN"
    )];
    lines.extend(summaries.iter().map(|s| {
        format!(
            "{:<14} {:>9} {:>9}  {}  {}",
            s.plate,
            s.sightings,
            s.distinct_locations,
            s.first_seen.format(TIMESTAMP),
            s.last_seen.format(TIMESTAMP)
        )
    }));
    lines.join("\n")
}

/// The dates a plate was seen on.
#[must_use]
pub fn dates(plate: &str, dates: &[NaiveDate]) -> String {
    if dates.is_empty() {
        return format!("No sightings for {plate}.");
    }

    let mut lines = vec![format!("{plate}: {} day(s)", dates.len())];
    lines.extend(dates.iter().map(|d| format!("  {}", d.format("%Y-%m-%d (%A)"))));
    lines.join("\n")
}

/// Ranked locations, each followed by its visits.
#[must_use]
pub fn hotspots(hotspots: &[Hotspot]) -> String {
    if hotspots.is_empty() {
        return "No hotspots.".to_string();
    }

    let mut lines = Vec::new();
    for hotspot in hotspots {
        lines.push(format!(
            "[#{}] {} - {} visit(s)",
            hotspot.rank, hotspot.location, hotspot.count
        ));
        for visit in &hotspot.visits {
            lines.push(format!(
                "    {}  stayed {}",
                visit.timestamp.format(TIMESTAMP),
                stay(visit)
            ));
        }
    }
    lines.join("\n")
}

/// Residence candidates, the first being the inferred residence.
#[must_use]
pub fn residence(candidates: &[ResidenceCandidate]) -> String {
    let Some(best) = candidates.first() else {
        return "No overnight long stays found.".to_string();
    };

    let mut lines = vec![format!(
        "Likely residence: {} ({} night(s))",
        best.location, best.count
    )];
    for candidate in candidates {
        lines.push(format!("  {} - {} night(s)", candidate.location, candidate.count));
        for entry in &candidate.stays {
            lines.push(format!(
                "    {} ({})  stayed {}",
                entry.timestamp.format(TIMESTAMP),
                entry.weekday.label(),
                stay(entry)
            ));
        }
    }
    lines.join("\n")
}

fn state_note(stop: &ItineraryStop) -> String {
    match (stop.state, stop.dwell_seconds) {
        (DwellState::EndOfRecord, _) | (_, None) => "no further sightings".to_string(),
        (DwellState::AnomalousLongDwell, Some(dwell)) => {
            format!("LONG STAY {}", format_duration(dwell))
        }
        (DwellState::Normal, Some(dwell)) => format!("interval {}", format_duration(dwell)),
    }
}

/// One day's stops.
#[must_use]
pub fn itinerary(plate: &str, date: NaiveDate, stops: &[ItineraryStop]) -> String {
    if stops.is_empty() {
        return format!("No sightings for {plate} on {date}.");
    }

    let mut lines = vec![
        format!("{plate} on {}", date.format("%Y-%m-%d (%A)")),
        format!(
            "{:<8}  {:<24}  {:<14}  NOTE",
            "ARRIVAL", "LOCATION", "DEPARTURE"
        ),
    ];
    lines.extend(stops.iter().map(|stop| {
        format!(
            "{:<8}  {:<24}  {:<14}  {}",
            stop.arrival.format(CLOCK),
            stop.location,
            format_departure(stop.departure, stop.departure_day_offset),
            state_note(stop)
        )
    }));
    lines.join("\n")
}

/// Co-location matches, newest first.
#[must_use]
pub fn colocations(matches: &[ColocationMatch]) -> String {
    if matches.is_empty() {
        return "No co-located sightings.".to_string();
    }

    let mut lines = vec![format!("{} co-located sighting(s)", matches.len())];
    lines.extend(matches.iter().map(|m| {
        format!(
            "  {}  {:<20}  {} {}  {} {}  ({}s apart)",
            m.date,
            m.location,
            m.plate_a,
            m.timestamp_a.format(CLOCK),
            m.plate_b,
            m.timestamp_b.format(CLOCK),
            m.diff_seconds
        )
    }));
    lines.join("\n")
}

fn destinations(title: &str, ranked: &[RankedDestination]) -> Vec<String> {
    let mut lines = vec![format!("{title}:")];
    if ranked.is_empty() {
        lines.push("  (none)".to_string());
        return lines;
    }
    for (idx, dest) in ranked.iter().enumerate() {
        #[allow(clippy::cast_possible_truncation)]
        let mean = dest.mean_elapsed_seconds.round() as i64;
        lines.push(format!(
            "  {}. {:<24} {:>5.1}%  ({} time(s), ~{} later)",
            idx + 1,
            dest.location,
            dest.probability,
            dest.count,
            format_duration(mean)
        ));
    }
    lines
}

/// Next-stop and final-destination rankings.
#[must_use]
pub fn prediction(plate: &str, location: &str, prediction: &Prediction) -> String {
    if prediction.anchor_count == 0 {
        return format!("{plate} has never been seen at {location}.");
    }

    let mut lines = vec![format!(
        "{plate} at {location}: {} past visit(s), based on {}",
        prediction.anchor_count,
        prediction.tier.description()
    )];
    lines.extend(destinations("Next stop", &prediction.next_stops));
    lines.extend(destinations("Final destination", &prediction.final_destinations));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use vehicle_trace_analytics_models::PredictionTier;

    use super::*;

    fn at(day: u32, hour: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(hour, min, 0)
            .unwrap()
    }

    #[test]
    fn durations() {
        assert_eq!(format_duration(0), "0m");
        assert_eq!(format_duration(59), "0m");
        assert_eq!(format_duration(45 * 60), "45m");
        assert_eq!(format_duration(2 * 3600 + 5 * 60 + 30), "2h 5m");
        assert_eq!(format_duration(3600), "1h 0m");
    }

    #[test]
    fn departure_on_later_day_is_marked() {
        assert_eq!(format_departure(Some(at(15, 9, 30)), Some(0)), "09:30:00");
        assert_eq!(format_departure(Some(at(16, 8, 0)), Some(1)), "08:00:00 (+1d)");
        assert_eq!(format_departure(None, None), "-");
    }

    #[test]
    fn itinerary_notes_reflect_state() {
        let stops = vec![
            ItineraryStop {
                arrival: at(15, 7, 0),
                location: "Home".to_string(),
                departure: Some(at(15, 7, 45)),
                departure_day_offset: Some(0),
                dwell_seconds: Some(45 * 60),
                state: DwellState::Normal,
            },
            ItineraryStop {
                arrival: at(15, 22, 0),
                location: "Home".to_string(),
                departure: Some(at(16, 7, 0)),
                departure_day_offset: Some(1),
                dwell_seconds: Some(9 * 3600),
                state: DwellState::AnomalousLongDwell,
            },
        ];
        let text = itinerary("ABC123", at(15, 0, 0).date(), &stops);

        assert!(text.contains("interval 45m"));
        assert!(text.contains("LONG STAY 9h 0m"));
        assert!(text.contains("07:00:00 (+1d)"));
    }

    #[test]
    fn empty_results_say_so() {
        assert_eq!(residence(&[]), "No overnight long stays found.");
        assert_eq!(colocations(&[]), "No co-located sightings.");
        assert_eq!(hotspots(&[]), "No hotspots.");
        let empty = Prediction {
            tier: PredictionTier::AllVisits,
            anchor_count: 0,
            next_stops: vec![],
            final_destinations: vec![],
        };
        assert_eq!(
            prediction("ABC123", "Gate", &empty),
            "ABC123 has never been seen at Gate."
        );
    }

    #[test]
    fn prediction_lists_ranked_destinations() {
        let result = Prediction {
            tier: PredictionTier::HourWindow,
            anchor_count: 3,
            next_stops: vec![RankedDestination {
                location: "Office".to_string(),
                count: 2,
                mean_elapsed_seconds: 1_800.0,
                probability: 66.7,
            }],
            final_destinations: vec![],
        };
        let text = prediction("ABC123", "Home", &result);

        assert!(text.contains("similar time of day, any weekday"));
        assert!(text.contains("66.7%"));
        assert!(text.contains("~30m later"));
        assert!(text.contains("(none)"));
    }
}
