#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Canonical vehicle sighting record and weekday types.
//!
//! Every imported table, whatever its column names, is normalized into
//! [`Sighting`] records before any trajectory analysis runs.

use chrono::{Datelike as _, NaiveDate, NaiveDateTime, Timelike as _};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// The four fields every sighting table must provide.
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
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CanonicalField {
    /// Vehicle registration plate.
    Plate,
    /// Where the vehicle was observed (camera, gate, checkpoint).
    Location,
    /// Calendar date of the observation.
    Date,
    /// Time of day of the observation.
    Time,
}

impl CanonicalField {
    /// All canonical fields in column order.
    pub const ALL: [Self; 4] = [Self::Plate, Self::Location, Self::Date, Self::Time];
}

/// Day of the week a sighting falls on.
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
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Weekday {
    /// Monday
    Monday,
    /// Tuesday
    Tuesday,
    /// Wednesday
    Wednesday,
    /// Thursday
    Thursday,
    /// Friday
    Friday,
    /// Saturday
    Saturday,
    /// Sunday
    Sunday,
}

impl Weekday {
    /// Capitalized English name, for display.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        }
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(value: chrono::Weekday) -> Self {
        match value {
            chrono::Weekday::Mon => Self::Monday,
            chrono::Weekday::Tue => Self::Tuesday,
            chrono::Weekday::Wed => Self::Wednesday,
            chrono::Weekday::Thu => Self::Thursday,
            chrono::Weekday::Fri => Self::Friday,
            chrono::Weekday::Sat => Self::Saturday,
            chrono::Weekday::Sun => Self::Sunday,
        }
    }
}

/// A single observation of a vehicle at a location.
///
/// Timestamps carry no timezone: they are whatever local clock the
/// capturing system used.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sighting {
    /// Trimmed, non-empty plate.
    pub plate: String,
    /// Trimmed, non-empty location name.
    pub location: String,
    /// Observation time.
    pub timestamp: NaiveDateTime,
}

impl Sighting {
    /// Creates a sighting, trimming plate and location.
    #[must_use]
    pub fn new(plate: &str, location: &str, timestamp: NaiveDateTime) -> Self {
        Self {
            plate: plate.trim().to_string(),
            location: location.trim().to_string(),
            timestamp,
        }
    }

    /// Calendar date of the observation.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Hour of day (0-23).
    #[must_use]
    pub fn hour(&self) -> u32 {
        self.timestamp.hour()
    }

    /// Day of the week.
    #[must_use]
    pub fn weekday(&self) -> Weekday {
        self.timestamp.weekday().into()
    }
}
