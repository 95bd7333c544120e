//! Header alias table.
//!
//! Exports from different plate-recognition systems name the same column
//! differently (`plate`, `license_plate`, `車牌`, ...). [`FieldAliases`]
//! maps every known spelling onto a [`CanonicalField`] and resolves a
//! table's header row into column positions.

use std::collections::BTreeMap;

use serde::Deserialize;
use vehicle_trace_sighting_models::CanonicalField;

use crate::NormalizeError;

const PLATE_ALIASES: &[&str] = &[
    "plate",
    "plate_no",
    "plate_number",
    "license_plate",
    "licence_plate",
    "registration",
    "vehicle",
    "vehicle_id",
    "車牌",
    "車牌號碼",
    "車號",
];

const LOCATION_ALIASES: &[&str] = &[
    "location",
    "place",
    "site",
    "camera",
    "checkpoint",
    "地點",
    "位置",
];

const DATE_ALIASES: &[&str] = &["date", "day", "日期"];

const TIME_ALIASES: &[&str] = &["time", "time_of_day", "時間"];

/// Additional header spellings, usually loaded from the `[aliases]` table
/// of a config file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AliasOverrides {
    /// Extra names for the plate column.
    pub plate: Vec<String>,
    /// Extra names for the location column.
    pub location: Vec<String>,
    /// Extra names for the date column.
    pub date: Vec<String>,
    /// Extra names for the time column.
    pub time: Vec<String>,
}

/// Resolved column positions for the canonical fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    /// Index of the plate column.
    pub plate: usize,
    /// Index of the location column.
    pub location: usize,
    /// Index of the date column.
    pub date: usize,
    /// Index of the time column.
    pub time: usize,
}

/// Maps lowercase header spellings to canonical fields.
#[derive(Debug, Clone)]
pub struct FieldAliases {
    lookup: BTreeMap<String, CanonicalField>,
}

impl Default for FieldAliases {
    fn default() -> Self {
        Self::builtin()
    }
}

impl FieldAliases {
    /// The built-in alias table (English and Traditional Chinese headers).
    #[must_use]
    pub fn builtin() -> Self {
        let mut aliases = Self {
            lookup: BTreeMap::new(),
        };
        for (field, names) in [
            (CanonicalField::Plate, PLATE_ALIASES),
            (CanonicalField::Location, LOCATION_ALIASES),
            (CanonicalField::Date, DATE_ALIASES),
            (CanonicalField::Time, TIME_ALIASES),
        ] {
            for name in names {
                aliases.insert(field, name);
            }
        }
        aliases
    }

    /// Adds every spelling from `overrides` on top of the current table.
    #[must_use]
    pub fn with_overrides(mut self, overrides: &AliasOverrides) -> Self {
        for (field, names) in [
            (CanonicalField::Plate, &overrides.plate),
            (CanonicalField::Location, &overrides.location),
            (CanonicalField::Date, &overrides.date),
            (CanonicalField::Time, &overrides.time),
        ] {
            for name in names {
                self.insert(field, name);
            }
        }
        self
    }

    /// Registers one spelling for `field`. Later registrations win.
    pub fn insert(&mut self, field: CanonicalField, name: &str) {
        self.lookup.insert(header_key(name), field);
    }

    /// Returns the canonical field a header maps to, if any.
    #[must_use]
    pub fn field_for(&self, header: &str) -> Option<CanonicalField> {
        self.lookup.get(&header_key(header)).copied()
    }

    /// Resolves a header row into column positions.
    ///
    /// When several columns map to the same field the leftmost one is used.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError::Schema`] naming every canonical field that
    /// has no matching header.
    pub fn resolve(&self, headers: &[String]) -> Result<ColumnMap, NormalizeError> {
        let mut found: BTreeMap<CanonicalField, usize> = BTreeMap::new();

        for (idx, header) in headers.iter().enumerate() {
            let Some(field) = self.field_for(header) else {
                continue;
            };
            if let Some(existing) = found.get(&field) {
                log::debug!(
                    "Column {idx} ({header:?}) also maps to {field}; keeping column {existing}"
                );
                continue;
            }
            found.insert(field, idx);
        }

        let missing: Vec<CanonicalField> = CanonicalField::ALL
            .into_iter()
            .filter(|f| !found.contains_key(f))
            .collect();

        if !missing.is_empty() {
            return Err(NormalizeError::Schema { missing });
        }

        Ok(ColumnMap {
            plate: found[&CanonicalField::Plate],
            location: found[&CanonicalField::Location],
            date: found[&CanonicalField::Date],
            time: found[&CanonicalField::Time],
        })
    }
}

fn header_key(header: &str) -> String {
    header.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn resolves_english_headers_case_insensitively() {
        let map = FieldAliases::builtin()
            .resolve(&headers(&["Date", " Time ", "PLATE", "Location", "notes"]))
            .unwrap();
        assert_eq!(
            map,
            ColumnMap {
                plate: 2,
                location: 3,
                date: 0,
                time: 1,
            }
        );
    }

    #[test]
    fn resolves_chinese_headers() {
        let map = FieldAliases::builtin()
            .resolve(&headers(&["車牌", "地點", "日期", "時間"]))
            .unwrap();
        assert_eq!(map.plate, 0);
        assert_eq!(map.time, 3);
    }

    #[test]
    fn reports_all_missing_fields() {
        let err = FieldAliases::builtin()
            .resolve(&headers(&["plate", "camera"]))
            .unwrap_err();
        match err {
            NormalizeError::Schema { missing } => {
                assert_eq!(missing, vec![CanonicalField::Date, CanonicalField::Time]);
            }
            other => panic!("expected schema error, got {other}"),
        }
    }

    #[test]
    fn leftmost_duplicate_column_wins() {
        let map = FieldAliases::builtin()
            .resolve(&headers(&["vehicle", "plate", "site", "date", "time"]))
            .unwrap();
        assert_eq!(map.plate, 0);
    }

    #[test]
    fn overrides_extend_the_builtin_table() {
        let overrides = AliasOverrides {
            location: vec!["Gantry".to_string()],
            ..AliasOverrides::default()
        };
        let aliases = FieldAliases::builtin().with_overrides(&overrides);
        assert_eq!(aliases.field_for("gantry"), Some(CanonicalField::Location));
        assert_eq!(aliases.field_for("camera"), Some(CanonicalField::Location));
    }
}
