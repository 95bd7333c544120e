//! Dataset overview.

use std::collections::BTreeSet;

use vehicle_trace_analytics_models::PlateSummary;

use crate::timeline::Timeline;

/// Summarizes every plate in the timeline, sorted by plate.
#[must_use]
pub fn summarize_plates(timeline: &Timeline) -> Vec<PlateSummary> {
    timeline
        .entries()
        .chunk_by(|a, b| a.plate == b.plate)
        .filter_map(|entries| {
            let first = entries.first()?;
            let last = entries.last()?;
            let locations: BTreeSet<&str> = entries.iter().map(|e| e.location.as_str()).collect();
            Some(PlateSummary {
                plate: first.plate.clone(),
                sightings: entries.len(),
                distinct_locations: locations.len(),
                first_seen: first.timestamp,
                last_seen: last.timestamp,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use vehicle_trace_analytics_models::TripConfig;

    use super::*;
    use crate::timeline::build_timelines;
    use crate::timeline::test_support::{at, sighting};

    #[test]
    fn summarizes_each_plate() {
        let sightings = vec![
            sighting("B", "Gate", 16, 9, 0),
            sighting("A", "Gate", 15, 8, 0),
            sighting("A", "Mall", 17, 18, 0),
            sighting("A", "Gate", 16, 8, 0),
        ];
        let timeline = build_timelines(&sightings, &TripConfig::default());
        let summary = summarize_plates(&timeline);

        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].plate, "A");
        assert_eq!(summary[0].sightings, 3);
        assert_eq!(summary[0].distinct_locations, 2);
        assert_eq!(summary[0].first_seen, at(15, 8, 0));
        assert_eq!(summary[0].last_seen, at(17, 18, 0));
        assert_eq!(summary[1].plate, "B");
    }
}
