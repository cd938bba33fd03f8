//! Cleaned sales table types.

use std::collections::BTreeMap;

use polars::prelude::{DataFrame, NamedFrom, Series};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::schema::TableSchema;

/// One cleaned row of input: chain-wide weekly sales of one product,
/// with per-restaurant contributions where the source reported them.
///
/// `(year, week, product)` is unique within a [`CleanedTable`]. The
/// restaurant map holds only columns that were present and numeric in
/// the source; an absent key means "not reported", which is distinct
/// from a reported zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub year: i32,
    /// ISO week number, 1..=53
    pub week: u32,
    /// Calendar month, 1..=12
    pub month: u32,
    pub product: String,
    /// Chain-wide total for the week, in physical units (kg/portions)
    pub total: f64,
    pub by_restaurant: BTreeMap<String, f64>,
}

impl SalesRecord {
    /// De-duplication key.
    pub fn key(&self) -> (i32, u32, &str) {
        (self.year, self.week, self.product.as_str())
    }
}

/// What wins when two sources report the same (year, week, product).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DedupPolicy {
    /// Keep the first occurrence in upload order
    #[default]
    FirstWins,
    /// Keep the last occurrence in upload order
    LastWins,
    /// Error out when duplicates disagree; identical rows still collapse
    RejectConflict,
}

/// Non-fatal findings accumulated while loading and cleaning.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoadReport {
    /// Files skipped entirely, with the reason
    pub skipped_files: Vec<(String, String)>,
    /// Rows dropped per file because a required field failed coercion
    pub dropped_rows: Vec<(String, usize)>,
    /// Duplicate (year, week, product) rows removed across all files
    pub duplicate_rows: usize,
    /// Rows removed because their total was negative
    pub negative_totals: usize,
}

impl LoadReport {
    /// True when nothing was skipped or dropped anywhere.
    pub fn is_clean(&self) -> bool {
        self.skipped_files.is_empty()
            && self.duplicate_rows == 0
            && self.negative_totals == 0
            && self.dropped_rows.iter().all(|(_, n)| *n == 0)
    }
}

/// The cleaned dataset for one session: records, the column
/// classification they were loaded under, and the cleaning report.
#[derive(Debug, Clone, Default)]
pub struct CleanedTable {
    pub records: Vec<SalesRecord>,
    pub schema: TableSchema,
    pub report: LoadReport,
}

impl CleanedTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct products, sorted.
    pub fn products(&self) -> Vec<String> {
        let mut products: Vec<String> =
            self.records.iter().map(|r| r.product.clone()).collect();
        products.sort();
        products.dedup();
        products
    }

    /// Distinct years, ascending.
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.records.iter().map(|r| r.year).collect();
        years.sort_unstable();
        years.dedup();
        years
    }

    /// Recognized restaurant columns, sorted.
    pub fn restaurants(&self) -> &[String] {
        &self.schema.restaurants
    }

    /// Render the cleaned table back into a DataFrame.
    ///
    /// Months come out numeric, restaurant columns keep their nulls, so
    /// feeding the result back through the normalizer is lossless.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let years: Vec<i64> = self.records.iter().map(|r| r.year as i64).collect();
        let weeks: Vec<i64> = self.records.iter().map(|r| r.week as i64).collect();
        let months: Vec<i64> = self.records.iter().map(|r| r.month as i64).collect();
        let products: Vec<&str> =
            self.records.iter().map(|r| r.product.as_str()).collect();
        let totals: Vec<f64> = self.records.iter().map(|r| r.total).collect();

        let mut columns = vec![
            Series::new("Year", years),
            Series::new("Week", weeks),
            Series::new("Month", months),
            Series::new("Product", products),
            Series::new("Total", totals),
        ];

        for restaurant in &self.schema.restaurants {
            let values: Vec<Option<f64>> = self
                .records
                .iter()
                .map(|r| r.by_restaurant.get(restaurant).copied())
                .collect();
            columns.push(Series::new(restaurant, values));
        }

        Ok(DataFrame::new(columns)?)
    }
}
