//! # Sales Data
//!
//! Ingestion and cleaning of weekly restaurant-chain sales spreadsheets.
//!
//! ## Pipeline
//!
//! - Load one or more tabular files (CSV) into dataframes
//! - Classify every column at load time: base field, restaurant
//!   dimension, or ignored
//! - Coerce and validate rows into typed [`SalesRecord`]s, dropping the
//!   unusable ones with warnings
//! - De-duplicate by (year, week, product) under an explicit policy
//! - Resolve (year, ISO week) to the week's Monday
//! - Aggregate into one point per (date, product)
//!
//! ## Quick Start
//!
//! ```no_run
//! use sales_data::{aggregate, SalesLoader};
//!
//! # fn main() -> sales_data::Result<()> {
//! let table = SalesLoader::new().from_csv_paths(&["sales_2024.csv"])?;
//! println!("{} cleaned rows, {} restaurants", table.len(), table.restaurants().len());
//!
//! let aggregated = aggregate(&table)?;
//! for point in aggregated.product_points("Beef Patty Prep") {
//!     println!("{} {}", point.date, point.total);
//! }
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod calendar;
pub mod error;
pub mod normalize;
pub mod schema;
pub mod table;
pub mod utils;

// Re-export commonly used types
pub use crate::aggregate::{aggregate, AggregatedTable, DatedSeriesPoint};
pub use crate::calendar::{iso_week_monday, iso_weeks_in_year};
pub use crate::error::{DataError, Result};
pub use crate::normalize::{LoadOptions, SalesLoader};
pub use crate::schema::{ColumnClass, TableSchema};
pub use crate::table::{CleanedTable, DedupPolicy, LoadReport, SalesRecord};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
