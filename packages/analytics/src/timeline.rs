//! Per-vehicle timeline construction and trip segmentation.
//!
//! Sightings are sorted by (plate, timestamp) and then scanned pairwise
//! within each plate to attach the next sighting, the dwell until it, and a
//! trip id. The resulting [`Timeline`] keeps each plate's entries contiguous
//! and trip ids increasing in storage order, so per-plate and per-trip views
//! are plain sub-slices.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use vehicle_trace_analytics_models::{TimelineEntry, TripConfig};
use vehicle_trace_sighting_models::Sighting;

/// Every vehicle's time-ordered, trip-segmented sightings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timeline {
    entries: Vec<TimelineEntry>,
}

impl Timeline {
    /// All entries, ordered by plate and then timestamp.
    #[must_use]
    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    /// Total number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the timeline holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One plate's entries in time order. Empty for an unknown plate.
    #[must_use]
    pub fn for_plate(&self, plate: &str) -> &[TimelineEntry] {
        let start = self.entries.partition_point(|e| e.plate.as_str() < plate);
        let end = self.entries.partition_point(|e| e.plate.as_str() <= plate);
        &self.entries[start..end]
    }

    /// Whether any entry belongs to `plate`.
    #[must_use]
    pub fn contains_plate(&self, plate: &str) -> bool {
        !self.for_plate(plate).is_empty()
    }

    /// Distinct plates, sorted.
    #[must_use]
    pub fn plates(&self) -> Vec<&str> {
        let mut plates: Vec<&str> = self.entries.iter().map(|e| e.plate.as_str()).collect();
        plates.dedup();
        plates
    }

    /// Distinct calendar dates on which `plate` was seen, sorted.
    #[must_use]
    pub fn dates_for_plate(&self, plate: &str) -> Vec<NaiveDate> {
        self.for_plate(plate)
            .iter()
            .map(TimelineEntry::date)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// The entries of one trip, in time order.
    #[must_use]
    pub fn trip(&self, trip_id: u64) -> &[TimelineEntry] {
        let start = self.entries.partition_point(|e| e.trip_id < trip_id);
        let end = self.entries.partition_point(|e| e.trip_id <= trip_id);
        &self.entries[start..end]
    }

    /// Number of trips in the timeline.
    #[must_use]
    pub fn trip_count(&self) -> u64 {
        self.entries.last().map_or(0, |e| e.trip_id)
    }
}

/// Builds every vehicle's timeline from normalized sightings.
///
/// Sightings with equal plate and timestamp keep their input order. A new
/// trip starts at each plate's first sighting, after a dwell of at least
/// `config.long_stay_seconds`, or after a gap longer than
/// `config.break_gap_seconds`. Trip ids count up from 1 across the whole
/// timeline.
#[must_use]
pub fn build_timelines(sightings: &[Sighting], config: &TripConfig) -> Timeline {
    let mut ordered: Vec<&Sighting> = sightings.iter().collect();
    ordered.sort_by(|a, b| {
        a.plate
            .cmp(&b.plate)
            .then_with(|| a.timestamp.cmp(&b.timestamp))
    });

    let mut entries = Vec::with_capacity(ordered.len());
    let mut trip_id: u64 = 0;

    for group in ordered.chunk_by(|a, b| a.plate == b.plate) {
        let mut prev_dwell: Option<i64> = None;

        for (idx, sighting) in group.iter().enumerate() {
            let next = group.get(idx + 1);
            let dwell_seconds = next.map(|n| (n.timestamp - sighting.timestamp).num_seconds());

            let starts_trip = idx == 0
                || prev_dwell.is_some_and(|dwell| {
                    dwell >= config.long_stay_seconds || dwell > config.break_gap_seconds
                });
            if starts_trip {
                trip_id += 1;
            }

            entries.push(TimelineEntry {
                plate: sighting.plate.clone(),
                location: sighting.location.clone(),
                timestamp: sighting.timestamp,
                weekday: sighting.weekday(),
                next_location: next.map(|n| n.location.clone()),
                next_timestamp: next.map(|n| n.timestamp),
                dwell_seconds,
                trip_id,
            });

            prev_dwell = dwell_seconds;
        }
    }

    log::debug!(
        "Built timeline: {} entries, {trip_id} trip(s)",
        entries.len()
    );

    Timeline { entries }
}


#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use vehicle_trace_sighting_models::Weekday;

    use super::test_support::{at, sighting};
    use super::*;

    #[test]
    fn orders_each_plate_and_links_next_sighting() {
        let sightings = vec![
            sighting("B", "Loc2", 15, 9, 0),
            sighting("A", "Loc2", 15, 8, 10),
            sighting("A", "Loc1", 15, 8, 0),
        ];
        let timeline = build_timelines(&sightings, &TripConfig::default());

        let a = timeline.for_plate("A");
        assert_eq!(a.len(), 2);
        assert_eq!(a[0].location, "Loc1");
        assert_eq!(a[0].next_location.as_deref(), Some("Loc2"));
        assert_eq!(a[0].next_timestamp, Some(at(15, 8, 10)));
        assert_eq!(a[0].dwell_seconds, Some(600));
        assert_eq!(a[0].weekday, Weekday::Monday);
        assert_eq!(a[1].dwell_seconds, None);
        assert_eq!(a[1].next_location, None);

        let b = timeline.for_plate("B");
        assert_eq!(b.len(), 1);
        assert_eq!(b[0].dwell_seconds, None);
        assert!(timeline.for_plate("C").is_empty());
    }

    #[test]
    fn long_stay_starts_a_new_trip() {
        let sightings = vec![
            sighting("A", "Home", 15, 8, 0),
            sighting("A", "Shop", 15, 8, 20),
            // dwell at Shop is 40 minutes, so Office opens trip 2
            sighting("A", "Office", 15, 9, 0),
            sighting("A", "Cafe", 15, 9, 29),
        ];
        let timeline = build_timelines(&sightings, &TripConfig::default());
        let ids: Vec<u64> = timeline.entries().iter().map(|e| e.trip_id).collect();
        assert_eq!(ids, vec![1, 1, 2, 2]);
    }

    #[test]
    fn dwell_exactly_at_threshold_splits_trip() {
        let sightings = vec![
            sighting("A", "Home", 15, 8, 0),
            sighting("A", "Shop", 15, 8, 30),
        ];
        let timeline = build_timelines(&sightings, &TripConfig::default());
        assert_eq!(timeline.entries()[1].trip_id, 2);
    }

    #[test]
    fn configured_break_gap_splits_trip_without_long_stay() {
        let config = TripConfig {
            long_stay_seconds: i64::MAX,
            break_gap_seconds: 600,
        };
        let sightings = vec![
            sighting("A", "Home", 15, 8, 0),
            sighting("A", "Shop", 15, 8, 10),
            sighting("A", "Office", 15, 8, 21),
        ];
        let timeline = build_timelines(&sightings, &config);
        let ids: Vec<u64> = timeline.entries().iter().map(|e| e.trip_id).collect();
        assert_eq!(ids, vec![1, 1, 2]);
    }

    #[test]
    fn trip_ids_continue_across_plates() {
        let sightings = vec![
            sighting("A", "Loc1", 15, 8, 0),
            sighting("A", "Loc2", 15, 8, 5),
            sighting("B", "Loc1", 15, 8, 0),
        ];
        let timeline = build_timelines(&sightings, &TripConfig::default());
        assert_eq!(timeline.for_plate("B")[0].trip_id, 2);
        assert_eq!(timeline.trip_count(), 2);
        assert_eq!(timeline.trip(1).len(), 2);
        assert_eq!(timeline.trip(2)[0].plate, "B");
        assert!(timeline.trip(3).is_empty());
    }

    #[test]
    fn equal_timestamps_keep_input_order() {
        let sightings = vec![
            sighting("A", "First", 15, 8, 0),
            sighting("A", "Second", 15, 8, 0),
        ];
        let timeline = build_timelines(&sightings, &TripConfig::default());
        assert_eq!(timeline.entries()[0].location, "First");
        assert_eq!(timeline.entries()[0].dwell_seconds, Some(0));
    }

    #[test]
    fn lists_plates_and_dates() {
        let sightings = vec![
            sighting("B", "Loc1", 16, 8, 0),
            sighting("A", "Loc1", 15, 8, 0),
            sighting("A", "Loc1", 17, 8, 0),
            sighting("A", "Loc2", 15, 9, 0),
        ];
        let timeline = build_timelines(&sightings, &TripConfig::default());
        assert_eq!(timeline.plates(), vec!["A", "B"]);
        assert_eq!(
            timeline.dates_for_plate("A"),
            vec![at(15, 0, 0).date(), at(17, 0, 0).date()]
        );
    }

    #[test]
    fn empty_input_builds_empty_timeline() {
        let timeline = build_timelines(&[], &TripConfig::default());
        assert!(timeline.is_empty());
        assert_eq!(timeline.trip_count(), 0);
        assert!(timeline.plates().is_empty());
    }

    fn arb_sightings() -> impl Strategy<Value = Vec<Sighting>> {
        prop::collection::vec(
            (
                prop::sample::select(vec!["A", "B", "C"]),
                prop::sample::select(vec!["Loc1", "Loc2", "Loc3"]),
                15_u32..18,
                0_u32..24,
                0_u32..60,
            ),
            0..40,
        )
        .prop_map(|rows| {
            rows.into_iter()
                .map(|(p, l, d, h, m)| sighting(p, l, d, h, m))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn timestamps_non_decreasing_and_dwell_non_negative(sightings in arb_sightings()) {
            let timeline = build_timelines(&sightings, &TripConfig::default());
            prop_assert_eq!(timeline.len(), sightings.len());
            for plate in timeline.plates() {
                let entries = timeline.for_plate(plate);
                for pair in entries.windows(2) {
                    prop_assert!(pair[0].timestamp <= pair[1].timestamp);
                }
                for entry in entries {
                    if let Some(dwell) = entry.dwell_seconds {
                        prop_assert!(dwell >= 0);
                    }
                }
                prop_assert!(entries.last().unwrap().dwell_seconds.is_none());
            }
        }

        #[test]
        fn trips_start_exactly_at_boundaries(sightings in arb_sightings()) {
            let config = TripConfig::default();
            let timeline = build_timelines(&sightings, &config);
            let entries = timeline.entries();
            for (idx, entry) in entries.iter().enumerate() {
                if idx == 0 {
                    prop_assert_eq!(entry.trip_id, 1);
                    continue;
                }
                let prev = &entries[idx - 1];
                prop_assert!(entry.trip_id >= prev.trip_id);
                let expected_new = prev.plate != entry.plate
                    || prev.dwell_seconds.is_some_and(|d| {
                        d >= config.long_stay_seconds || d > config.break_gap_seconds
                    });
                prop_assert_eq!(entry.trip_id > prev.trip_id, expected_new);
            }
        }
    }
}
