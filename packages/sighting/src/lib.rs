#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Sighting table decoding, column aliasing, and record normalization.
//!
//! Raw tables arrive with whatever headers the exporting system used. The
//! [`aliases::FieldAliases`] table collapses those headers onto the four
//! [`CanonicalField`]s, and [`normalize::normalize`] turns each row into a
//! typed [`vehicle_trace_sighting_models::Sighting`]. Any schema or parse
//! problem aborts the whole batch.

pub mod aliases;
pub mod normalize;
pub mod parsing;
pub mod table;

use vehicle_trace_sighting_models::CanonicalField;

pub use normalize::{NormalizedBatch, dedup_sightings, normalize};
pub use table::RawTable;

/// Errors that can occur while decoding or normalizing a sighting table.
#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    /// One or more canonical fields have no matching column.
    #[error("Schema error: missing required field(s): {}", join_fields(.missing))]
    Schema {
        /// Every canonical field that could not be resolved.
        missing: Vec<CanonicalField>,
    },

    /// A cell could not be coerced into its canonical type.
    #[error("Parse error: row {row}, field {field}: {message} (value: {value:?})")]
    Parse {
        /// 1-based data row number (the header row is not counted).
        row: usize,
        /// Field that failed.
        field: CanonicalField,
        /// The raw cell contents.
        value: String,
        /// Description of what went wrong.
        message: String,
    },

    /// I/O error while reading the source file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV decoding failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

fn join_fields(fields: &[CanonicalField]) -> String {
    fields
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join(", ")
}
