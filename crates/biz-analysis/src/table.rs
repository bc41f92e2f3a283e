//! In-memory tabular data loaded from CSV.
//!
//! Cells are kept as trimmed text. Numeric interpretation happens on demand
//! through [`Table::numeric_column`], so a table with an odd column is still
//! usable for whatever does not touch that column.

use std::io::Read;
use std::path::Path;

use crate::error::AnalysisError;

/// Cell spellings treated as a missing value rather than a parse failure.
const MISSING_MARKERS: &[&str] = &["", "nan", "na", "n/a", "null", "none"];

/// Ordered rows under a header. Read-only once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Build a table from already-split rows.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::DataFormat`] when there are no headers or a
    /// row's width differs from the header's.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self, AnalysisError> {
        if headers.iter().all(String::is_empty) {
            return Err(AnalysisError::DataFormat("missing header row".into()));
        }
        if let Some((idx, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != headers.len())
        {
            return Err(AnalysisError::DataFormat(format!(
                "row {} has {} fields, header has {}",
                idx + 1,
                row.len(),
                headers.len()
            )));
        }
        Ok(Self { headers, rows })
    }

    /// Load a CSV file with a header row.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Io`] when the file cannot be read and
    /// [`AnalysisError::DataFormat`] when its content is not a CSV table.
    pub fn from_path(path: &Path) -> Result<Self, AnalysisError> {
        let bytes = std::fs::read(path).map_err(|source| AnalysisError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_reader(bytes.as_slice())?;
        tracing::debug!(
            path = %path.display(),
            rows = table.len(),
            columns = table.headers.len(),
            "loaded table"
        );
        Ok(table)
    }

    /// Parse CSV text from any reader.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::DataFormat`] for a missing header row, ragged
    /// records or invalid UTF-8.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, AnalysisError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = reader
            .headers()
            .map_err(csv_error)?
            .iter()
            .enumerate()
            .map(|(idx, h)| {
                if idx == 0 {
                    h.trim_start_matches('\u{feff}').trim().to_string()
                } else {
                    h.to_string()
                }
            })
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(csv_error)?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Self::new(headers, rows)
    }

    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of data rows (the header is not counted).
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn has_column(&self, column: &str) -> bool {
        self.column_index(column).is_some()
    }

    /// Position of the first header named `column`.
    #[must_use]
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == column)
    }

    /// Text values of `column`, top to bottom.
    #[must_use]
    pub fn column(&self, column: &str) -> Option<Vec<&str>> {
        let idx = self.column_index(column)?;
        Some(self.rows.iter().map(|row| row[idx].as_str()).collect())
    }

    /// Numeric values of `column`; missing cells are `None`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::MissingColumn`] when the column is absent and
    /// [`AnalysisError::NonNumericValue`] for the first cell that is neither
    /// a number nor a missing marker.
    pub fn numeric_column(&self, column: &str) -> Result<Vec<Option<f64>>, AnalysisError> {
        let idx = self
            .column_index(column)
            .ok_or_else(|| AnalysisError::MissingColumn(column.to_string()))?;

        self.rows
            .iter()
            .enumerate()
            .map(|(row_idx, row)| {
                parse_number(&row[idx]).ok_or_else(|| AnalysisError::NonNumericValue {
                    column: column.to_string(),
                    row: row_idx + 1,
                    value: row[idx].clone(),
                })
            })
            .collect()
    }
}

/// `Some(None)` for a missing marker, `Some(Some(v))` for a finite number,
/// `None` when the cell is not numeric.
fn parse_number(cell: &str) -> Option<Option<f64>> {
    let cell = cell.trim();
    if MISSING_MARKERS
        .iter()
        .any(|marker| cell.eq_ignore_ascii_case(marker))
    {
        return Some(None);
    }
    cell.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(Some)
}

fn csv_error(error: csv::Error) -> AnalysisError {
    AnalysisError::DataFormat(error.to_string())
}
