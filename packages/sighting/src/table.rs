//! Raw, untyped sighting tables.
//!
//! A [`RawTable`] is the hand-off point between file decoding and
//! normalization: a header row plus string cells, with no assumptions about
//! column names or order.

use std::io::Read;
use std::path::Path;

use crate::NormalizeError;

/// A header row plus string cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    /// Column headers, trimmed.
    pub headers: Vec<String>,
    /// Data rows. Rows may be shorter or longer than `headers`.
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Creates a table from headers and rows of string slices.
    #[must_use]
    pub fn new(headers: &[&str], rows: &[&[&str]]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.trim().to_string()).collect(),
            rows: rows
                .iter()
                .map(|row| row.iter().map(|c| (*c).to_string()).collect())
                .collect(),
        }
    }

    /// Returns the cell at `(row, col)`, or `""` when the row is short.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map_or("", String::as_str)
    }

    /// Number of data rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no data rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Decodes a UTF-8 CSV stream. The first record is the header row.
    ///
    /// Empty lines are skipped. Rows of empty cells (`;;;`) are kept so that
    /// row numbers in normalization errors match the file.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError::Csv`] if the stream is not valid CSV.
    pub fn from_csv_reader<R: Read>(reader: R, delimiter: u8) -> Result<Self, NormalizeError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_owned())
            .collect();

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            rows.push(record.iter().map(str::to_owned).collect());
        }

        log::debug!("Decoded {} CSV rows with {} columns", rows.len(), headers.len());

        Ok(Self { headers, rows })
    }

    /// Reads and decodes a CSV file.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError::Io`] if the file cannot be opened or
    /// [`NormalizeError::Csv`] if it is not valid CSV.
    pub fn from_csv_path(path: &Path, delimiter: u8) -> Result<Self, NormalizeError> {
        let file = std::fs::File::open(path)?;
        let table = Self::from_csv_reader(std::io::BufReader::new(file), delimiter)?;
        log::info!("Read {} rows from {}", table.len(), path.display());
        Ok(table)
    }
}
