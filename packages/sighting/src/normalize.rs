//! Raw table → typed sighting normalization.

use std::collections::HashSet;

use serde::Serialize;
use vehicle_trace_sighting_models::{CanonicalField, Sighting};

use crate::NormalizeError;
use crate::aliases::FieldAliases;
use crate::parsing::{parse_date, parse_time};
use crate::table::RawTable;

/// The clean output of [`normalize`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedBatch {
    /// Sightings in input order, duplicates removed.
    pub sightings: Vec<Sighting>,
    /// How many rows were dropped as exact duplicates.
    pub duplicates_removed: usize,
}

/// Normalizes a raw table into typed sightings.
///
/// Headers are resolved through `aliases`, plate and location are trimmed,
/// and date + time are combined into a single timestamp. Rows that repeat an
/// earlier (plate, location, timestamp) triple are dropped.
///
/// # Errors
///
/// * [`NormalizeError::Schema`] if any canonical field has no column.
/// * [`NormalizeError::Parse`] on the first row with an empty plate or
///   location, or an unparseable date or time. No rows are returned in
///   that case.
pub fn normalize(table: &RawTable, aliases: &FieldAliases) -> Result<NormalizedBatch, NormalizeError> {
    let columns = aliases.resolve(&table.headers)?;

    let mut sightings = Vec::with_capacity(table.len());

    for idx in 0..table.len() {
        let row = idx + 1;

        let plate = required_text(table.cell(idx, columns.plate), row, CanonicalField::Plate)?;
        let location =
            required_text(table.cell(idx, columns.location), row, CanonicalField::Location)?;

        let raw_date = table.cell(idx, columns.date);
        let date = parse_date(raw_date).ok_or_else(|| NormalizeError::Parse {
            row,
            field: CanonicalField::Date,
            value: raw_date.to_string(),
            message: "unrecognized date".to_string(),
        })?;

        let raw_time = table.cell(idx, columns.time);
        let time = parse_time(raw_time).ok_or_else(|| NormalizeError::Parse {
            row,
            field: CanonicalField::Time,
            value: raw_time.to_string(),
            message: "unrecognized time of day".to_string(),
        })?;

        sightings.push(Sighting {
            plate,
            location,
            timestamp: date.and_time(time),
        });
    }

    let (sightings, duplicates_removed) = dedup_sightings(sightings);

    log::info!(
        "Normalized {} sightings ({duplicates_removed} duplicate(s) removed)",
        sightings.len()
    );

    Ok(NormalizedBatch {
        sightings,
        duplicates_removed,
    })
}

/// Drops sightings whose (plate, location, timestamp) triple already
/// appeared, keeping the first. Returns the survivors and the number
/// removed.
#[must_use]
pub fn dedup_sightings(sightings: Vec<Sighting>) -> (Vec<Sighting>, usize) {
    let before = sightings.len();
    let mut seen = HashSet::with_capacity(before);

    let kept: Vec<Sighting> = sightings
        .into_iter()
        .filter(|s| seen.insert((s.plate.clone(), s.location.clone(), s.timestamp)))
        .collect();

    let removed = before - kept.len();
    (kept, removed)
}

fn required_text(raw: &str, row: usize, field: CanonicalField) -> Result<String, NormalizeError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(NormalizeError::Parse {
            row,
            field,
            value: raw.to_string(),
            message: "empty value".to_string(),
        });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[&[&str]]) -> RawTable {
        RawTable::new(&["車牌", "地點", "日期", "時間"], rows)
    }

    #[test]
    fn normalizes_and_trims_rows() {
        let batch = normalize(
            &table(&[&["  ABC-123 ", " North Gate", "2024-01-15", "08:00:00"]]),
            &FieldAliases::builtin(),
        )
        .unwrap();
        assert_eq!(batch.sightings.len(), 1);
        let s = &batch.sightings[0];
        assert_eq!(s.plate, "ABC-123");
        assert_eq!(s.location, "North Gate");
        assert_eq!(s.timestamp.to_string(), "2024-01-15 08:00:00");
        assert_eq!(batch.duplicates_removed, 0);
    }

    #[test]
    fn drops_duplicates_keeping_first() {
        let batch = normalize(
            &table(&[
                &["A", "Loc1", "2024-01-15", "08:00:00"],
                &["A ", "Loc1", "2024/01/15", "08:00"],
                &["A", "Loc2", "2024-01-15", "08:00:00"],
                &["B", "Loc1", "2024-01-15", "08:00:00"],
            ]),
            &FieldAliases::builtin(),
        )
        .unwrap();
        assert_eq!(batch.sightings.len(), 3);
        assert_eq!(batch.duplicates_removed, 1);
        assert_eq!(batch.sightings[1].location, "Loc2");
    }

    #[test]
    fn dedup_is_idempotent() {
        let batch = normalize(
            &table(&[
                &["A", "Loc1", "2024-01-15", "08:00:00"],
                &["A", "Loc1", "2024-01-15", "08:00:00"],
            ]),
            &FieldAliases::builtin(),
        )
        .unwrap();
        let (again, removed) = dedup_sightings(batch.sightings.clone());
        assert_eq!(removed, 0);
        assert_eq!(again, batch.sightings);
    }

    #[test]
    fn unparseable_date_fails_whole_batch() {
        let err = normalize(
            &table(&[
                &["A", "Loc1", "2024-01-15", "08:00:00"],
                &["A", "Loc1", "yesterday", "09:00:00"],
            ]),
            &FieldAliases::builtin(),
        )
        .unwrap_err();
        match err {
            NormalizeError::Parse {
                row, field, value, ..
            } => {
                assert_eq!(row, 2);
                assert_eq!(field, CanonicalField::Date);
                assert_eq!(value, "yesterday");
            }
            other => panic!("expected parse error, got {other}"),
        }
    }

    #[test]
    fn unparseable_time_fails_whole_batch() {
        let err = normalize(
            &table(&[&["A", "Loc1", "2024-01-15", "late"]]),
            &FieldAliases::builtin(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            NormalizeError::Parse {
                field: CanonicalField::Time,
                ..
            }
        ));
    }

    #[test]
    fn empty_plate_is_a_parse_error() {
        let err = normalize(
            &table(&[&["   ", "Loc1", "2024-01-15", "08:00:00"]]),
            &FieldAliases::builtin(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            NormalizeError::Parse {
                row: 1,
                field: CanonicalField::Plate,
                ..
            }
        ));
    }

    #[test]
    fn empty_cell_row_is_reported_at_its_file_position() {
        let data = "plate,location,date,time\n\
                    ABC-123,Gate,2024-01-15,08:00:00\n\
                    ,,,\n\
                    ABC-123,Mall,2024-01-15,09:00:00\n";
        let raw = RawTable::from_csv_reader(data.as_bytes(), b',').unwrap();
        let err = normalize(&raw, &FieldAliases::builtin()).unwrap_err();
        assert!(matches!(
            err,
            NormalizeError::Parse {
                row: 2,
                field: CanonicalField::Plate,
                ..
            }
        ));
    }

    #[test]
    fn missing_columns_fail_before_any_row_is_read() {
        let raw = RawTable::new(&["plate", "time"], &[&["A", "not-a-time"]]);
        let err = normalize(&raw, &FieldAliases::builtin()).unwrap_err();
        assert!(matches!(err, NormalizeError::Schema { ref missing } if missing.len() == 2));
    }
}
