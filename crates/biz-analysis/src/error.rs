//! Analysis error types.

use std::path::PathBuf;

/// Errors raised while loading or aggregating a sales table.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// The input is not delimited text with a header row.
    #[error("Data format error: {0}")]
    DataFormat(String),

    /// A column required for the computation is absent.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// A non-empty cell in a numeric column does not parse as a number.
    #[error("Non-numeric value {value:?} in column '{column}' at row {row}")]
    NonNumericValue {
        column: String,
        /// 1-based data row (the header is row 0).
        row: usize,
        value: String,
    },

    /// The input file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
