//! Single-day itinerary for one vehicle.

use chrono::NaiveDate;
use vehicle_trace_analytics_models::{ItineraryStop, TimelineEntry};

use crate::anomaly::tag_anomaly;

/// Lists one vehicle's stops on `date`, in time order.
///
/// Departure is the vehicle's next sighting, which may fall on a later
/// day; `departure_day_offset` counts the calendar days crossed. Each stop
/// is tagged against `alert_minutes`.
#[must_use]
pub fn daily_itinerary(
    entries: &[TimelineEntry],
    date: NaiveDate,
    alert_minutes: u32,
) -> Vec<ItineraryStop> {
    entries
        .iter()
        .filter(|e| e.date() == date)
        .map(|e| ItineraryStop {
            arrival: e.timestamp,
            location: e.location.clone(),
            departure: e.next_timestamp,
            departure_day_offset: e
                .next_timestamp
                .map(|next| (next.date() - e.date()).num_days()),
            dwell_seconds: e.dwell_seconds,
            state: tag_anomaly(e, alert_minutes),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use vehicle_trace_analytics_models::{DwellState, TripConfig};

    use super::*;
    use crate::timeline::build_timelines;
    use crate::timeline::test_support::{at, sighting};

    #[test]
    fn lists_only_the_requested_day() {
        let sightings = vec![
            sighting("A", "Home", 15, 7, 0),
            sighting("A", "Office", 15, 7, 45),
            sighting("A", "Cafe", 15, 12, 0),
            sighting("A", "Home", 15, 12, 20),
            sighting("A", "Office", 16, 8, 0),
        ];
        let timeline = build_timelines(&sightings, &TripConfig::default());
        let stops = daily_itinerary(timeline.for_plate("A"), at(15, 0, 0).date(), 60);

        let states: Vec<(&str, DwellState)> =
            stops.iter().map(|s| (s.location.as_str(), s.state)).collect();
        assert_eq!(
            states,
            vec![
                ("Home", DwellState::Normal),
                ("Office", DwellState::AnomalousLongDwell),
                ("Cafe", DwellState::Normal),
                ("Home", DwellState::AnomalousLongDwell),
            ]
        );
        assert_eq!(stops[0].departure_day_offset, Some(0));
        assert_eq!(stops[3].departure, Some(at(16, 8, 0)));
        assert_eq!(stops[3].departure_day_offset, Some(1));
    }

    #[test]
    fn final_sighting_is_end_of_record() {
        let sightings = vec![sighting("A", "Home", 15, 7, 0)];
        let timeline = build_timelines(&sightings, &TripConfig::default());
        let stops = daily_itinerary(timeline.for_plate("A"), at(15, 0, 0).date(), 60);
        assert_eq!(stops[0].state, DwellState::EndOfRecord);
        assert_eq!(stops[0].departure_day_offset, None);
    }

    #[test]
    fn day_without_sightings_is_empty() {
        let sightings = vec![sighting("A", "Home", 15, 7, 0)];
        let timeline = build_timelines(&sightings, &TripConfig::default());
        assert!(daily_itinerary(timeline.for_plate("A"), at(20, 0, 0).date(), 60).is_empty());
    }
}
