#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Trajectory analytics result types and analysis parameters.
//!
//! Defines the augmented timeline entry produced by the timeline builder,
//! the result type of each analysis, and the tunable thresholds that
//! drive them. Every type serializes to camelCase JSON so the CLI can
//! emit results verbatim.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use vehicle_trace_sighting_models::Weekday;

// ── Configuration ────────────────────────────────────────────────────────

/// Thresholds that split a vehicle's timeline into trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct TripConfig {
    /// A dwell at least this long ends the current trip.
    pub long_stay_seconds: i64,
    /// A gap strictly longer than this ends the current trip.
    pub break_gap_seconds: i64,
}

impl Default for TripConfig {
    fn default() -> Self {
        Self {
            long_stay_seconds: 1_800,
            break_gap_seconds: 14_400,
        }
    }
}

/// Conditioning parameters for next-stop prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct PredictionConfig {
    /// Anchors within this many hours of the current hour are "similar".
    pub hour_window: u32,
    /// Minimum anchors a tier needs before it is used.
    pub min_tier_samples: usize,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            hour_window: 3,
            min_tier_samples: 3,
        }
    }
}

/// Overnight-stay predicate parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ResidenceConfig {
    /// Minimum dwell, in hours.
    pub min_stay_hours: f64,
    /// Arrivals at or after this hour (or before 06:00) count as night.
    pub night_start_hour: u32,
}

impl Default for ResidenceConfig {
    fn default() -> Self {
        Self {
            min_stay_hours: 4.0,
            night_start_hour: 20,
        }
    }
}

/// Daily itinerary parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ItineraryConfig {
    /// Dwell (whole minutes) at which a stop is flagged as anomalous.
    pub alert_minutes: u32,
}

impl Default for ItineraryConfig {
    fn default() -> Self {
        Self { alert_minutes: 60 }
    }
}

/// Co-location matching parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ColocationConfig {
    /// Maximum timestamp difference for two sightings to match.
    pub tolerance_seconds: i64,
}

impl Default for ColocationConfig {
    fn default() -> Self {
        Self {
            tolerance_seconds: 60,
        }
    }
}

/// Hotspot ranking parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct HotspotConfig {
    /// Number of locations to return.
    pub limit: usize,
}

impl Default for HotspotConfig {
    fn default() -> Self {
        Self { limit: 20 }
    }
}

/// Every tunable analysis parameter, grouped by analysis.
///
/// All sections are optional when deserializing; missing values fall back
/// to their defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct AnalysisConfig {
    /// Trip segmentation.
    pub trip: TripConfig,
    /// Next-stop prediction.
    pub prediction: PredictionConfig,
    /// Overnight residence classification.
    pub residence: ResidenceConfig,
    /// Daily itinerary.
    pub itinerary: ItineraryConfig,
    /// Co-location matching.
    pub colocation: ColocationConfig,
    /// Hotspot ranking.
    pub hotspots: HotspotConfig,
}

// ── Timeline ─────────────────────────────────────────────────────────────

/// A sighting augmented with its link to the vehicle's next sighting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    /// Vehicle plate.
    pub plate: String,
    /// Where the vehicle was seen.
    pub location: String,
    /// When the vehicle was seen.
    pub timestamp: NaiveDateTime,
    /// Day of the week of `timestamp`.
    pub weekday: Weekday,
    /// Location of the same vehicle's next sighting.
    pub next_location: Option<String>,
    /// Time of the same vehicle's next sighting.
    pub next_timestamp: Option<NaiveDateTime>,
    /// Seconds until the next sighting. `None` for the vehicle's last
    /// sighting.
    pub dwell_seconds: Option<i64>,
    /// Trip this entry belongs to. Unique within one built timeline.
    pub trip_id: u64,
}

impl TimelineEntry {
    /// Calendar date of the sighting.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}

// ── Anomaly tagging ──────────────────────────────────────────────────────

/// Classification of one timeline entry's dwell.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum DwellState {
    /// Moving or stopped briefly.
    Normal,
    /// Stayed at least as long as the alert threshold.
    AnomalousLongDwell,
    /// Last known sighting of the vehicle.
    EndOfRecord,
}

// ── Results ──────────────────────────────────────────────────────────────

/// A location ranked by how often the vehicle was seen there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotspot {
    /// 1-based rank.
    pub rank: usize,
    /// Location name.
    pub location: String,
    /// Number of sightings at the location.
    pub count: usize,
    /// The sightings, in time order.
    pub visits: Vec<TimelineEntry>,
}

/// A candidate overnight residence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResidenceCandidate {
    /// Location name.
    pub location: String,
    /// Number of qualifying night long-stays.
    pub count: usize,
    /// The qualifying entries, in time order.
    pub stays: Vec<TimelineEntry>,
}

/// One stop in a vehicle's daily itinerary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryStop {
    /// Arrival (sighting) time.
    pub arrival: NaiveDateTime,
    /// Location name.
    pub location: String,
    /// Time of the next sighting, if any.
    pub departure: Option<NaiveDateTime>,
    /// Calendar days between arrival and departure (0 on the same day).
    pub departure_day_offset: Option<i64>,
    /// Seconds until the next sighting.
    pub dwell_seconds: Option<i64>,
    /// Dwell classification against the alert threshold.
    pub state: DwellState,
}

/// Two different vehicles seen at the same place at nearly the same time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColocationMatch {
    /// Shared location.
    pub location: String,
    /// Date of vehicle A's sighting.
    pub date: NaiveDate,
    /// Plate of vehicle A.
    pub plate_a: String,
    /// Vehicle A's sighting time.
    pub timestamp_a: NaiveDateTime,
    /// Plate of vehicle B.
    pub plate_b: String,
    /// Vehicle B's sighting time.
    pub timestamp_b: NaiveDateTime,
    /// Absolute difference between the two sightings, in seconds.
    pub diff_seconds: i64,
}

/// Which anchor subset a prediction was computed from.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PredictionTier {
    /// Same weekday and a similar hour.
    WeekdayAndHour,
    /// Similar hour on any weekday.
    HourWindow,
    /// Every visit to the location.
    AllVisits,
}

impl PredictionTier {
    /// Human-readable explanation of the conditioning used.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::WeekdayAndHour => "same weekday, similar time of day",
            Self::HourWindow => "similar time of day, any weekday",
            Self::AllVisits => "all historical visits",
        }
    }
}

/// One ranked destination in a prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedDestination {
    /// Destination location.
    pub location: String,
    /// Number of samples that went there.
    pub count: usize,
    /// Mean seconds from the anchor to arrival there.
    pub mean_elapsed_seconds: f64,
    /// Share of samples, as a percentage rounded to one decimal.
    pub probability: f64,
}

/// Next-stop and final-destination rankings for a vehicle at a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    /// Anchor subset used.
    pub tier: PredictionTier,
    /// Number of anchors in that subset.
    pub anchor_count: usize,
    /// Where the vehicle went immediately afterwards.
    pub next_stops: Vec<RankedDestination>,
    /// Where the vehicle's trip ended.
    pub final_destinations: Vec<RankedDestination>,
}

/// Per-plate overview of a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlateSummary {
    /// Vehicle plate.
    pub plate: String,
    /// Number of sightings.
    pub sightings: usize,
    /// Number of distinct locations.
    pub distinct_locations: usize,
    /// Earliest sighting.
    pub first_seen: NaiveDateTime,
    /// Latest sighting.
    pub last_seen: NaiveDateTime,
}
