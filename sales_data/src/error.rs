//! Error types for the sales_data crate

use polars::prelude::PolarsError;
use thiserror::Error;

/// Custom error types for the sales_data crate
#[derive(Debug, Error)]
pub enum DataError {
    /// A source file could not be opened or parsed as tabular data
    #[error("failed to read '{name}': {reason}")]
    FileRead { name: String, reason: String },

    /// A source file lacks one or more required columns
    #[error("'{name}' is missing required columns: {missing:?}")]
    MissingColumns { name: String, missing: Vec<String> },

    /// A column exists but cannot be coerced to the expected type
    #[error("column '{column}' cannot be coerced: {reason}")]
    ColumnCoercion { column: String, reason: String },

    /// Nothing survived cleaning, or every uploaded file was skipped
    #[error("no usable data after cleaning")]
    NoUsableData,

    /// Systemic corruption signal: most totals are non-positive
    #[error("{share:.0}% of 'Total' values are non-positive; input looks corrupt")]
    CorruptTotals { share: f64 },

    /// Two sources disagree on the same (year, week, product) key
    #[error("conflicting rows for year {year} week {week} product '{product}'")]
    DuplicateConflict {
        year: i32,
        week: u32,
        product: String,
    },

    /// The (year, week) pair does not denote a valid ISO 8601 week
    #[error("year {year} has no ISO week {week}")]
    InvalidIsoWeek { year: i32, week: u32 },

    /// Error from IO operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from Polars operations
    #[error("Polars error: {0}")]
    Polars(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, DataError>;

impl From<PolarsError> for DataError {
    fn from(err: PolarsError) -> Self {
        DataError::Polars(err.to_string())
    }
}
