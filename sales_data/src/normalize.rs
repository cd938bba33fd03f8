//! Upload normalization: raw tabular files to a [`CleanedTable`].

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use polars::prelude::*;
use tracing::warn;

use crate::error::{DataError, Result};
use crate::schema::{self, TableSchema, REQUIRED_COLUMNS};
use crate::table::{CleanedTable, DedupPolicy, LoadReport, SalesRecord};

/// Share of non-positive totals above which the merged upload is
/// rejected as systemically corrupt.
const CORRUPT_TOTAL_SHARE: f64 = 0.5;

/// Options controlling normalization.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Winner selection for duplicate (year, week, product) keys
    pub dedup: DedupPolicy,
    /// Known restaurant names; when set, only these become restaurant
    /// columns. When unset, every numeric extra column does.
    pub catalog: Option<Vec<String>>,
}

/// Loader for weekly sales uploads.
#[derive(Debug, Default)]
pub struct SalesLoader {
    options: LoadOptions,
}

impl SalesLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: LoadOptions) -> Self {
        Self { options }
    }

    /// Load one or more CSV files and clean them into a single table.
    ///
    /// Unreadable files are skipped with a warning; the call fails only
    /// when nothing usable remains.
    pub fn from_csv_paths<P: AsRef<Path>>(&self, paths: &[P]) -> Result<CleanedTable> {
        let mut sources = Vec::with_capacity(paths.len());
        let mut skipped = Vec::new();

        for path in paths {
            let name = path
                .as_ref()
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.as_ref().display().to_string());

            match read_csv(path.as_ref()) {
                Ok(df) => sources.push((name, df)),
                Err(err) => {
                    warn!(file = %name, error = %err, "skipping unreadable file");
                    skipped.push((name, err.to_string()));
                }
            }
        }

        let mut table = self.from_dataframes(sources)?;
        skipped.extend(table.report.skipped_files.drain(..));
        table.report.skipped_files = skipped;
        Ok(table)
    }

    /// Clean already-parsed frames. Each entry is `(file name, frame)`;
    /// the name only labels warnings.
    pub fn from_dataframes(&self, sources: Vec<(String, DataFrame)>) -> Result<CleanedTable> {
        let mut report = LoadReport::default();
        let mut schema = TableSchema::default();
        let mut rows: Vec<SalesRecord> = Vec::new();

        for (name, df) in sources {
            match self.clean_file(&name, &df, &mut schema) {
                Ok((mut file_rows, dropped)) => {
                    report.dropped_rows.push((name, dropped));
                    rows.append(&mut file_rows);
                }
                Err(err) => {
                    warn!(file = %name, error = %err, "skipping file");
                    report.skipped_files.push((name, err.to_string()));
                }
            }
        }

        if rows.is_empty() {
            return Err(DataError::NoUsableData);
        }

        let deduped = dedupe(rows, self.options.dedup, &mut report)?;

        // Systemic-corruption gate runs before negative rows are culled,
        // so an upload full of garbage totals fails loudly instead of
        // shrinking to a plausible-looking remnant.
        let non_positive = deduped.iter().filter(|r| r.total <= 0.0).count();
        let share = non_positive as f64 / deduped.len() as f64;
        if share > CORRUPT_TOTAL_SHARE {
            return Err(DataError::CorruptTotals {
                share: share * 100.0,
            });
        }

        let before = deduped.len();
        let records: Vec<SalesRecord> =
            deduped.into_iter().filter(|r| r.total >= 0.0).collect();
        report.negative_totals = before - records.len();
        if report.negative_totals > 0 {
            warn!(count = report.negative_totals, "dropped rows with negative totals");
        }

        if records.is_empty() {
            return Err(DataError::NoUsableData);
        }

        Ok(CleanedTable {
            records,
            schema,
            report,
        })
    }

    /// Clean a single file: verify structure, coerce columns, build rows.
    /// Returns the surviving rows and the dropped-row count.
    fn clean_file(
        &self,
        name: &str,
        df: &DataFrame,
        schema: &mut TableSchema,
    ) -> Result<(Vec<SalesRecord>, usize)> {
        if df.height() == 0 {
            return Err(DataError::FileRead {
                name: name.to_string(),
                reason: "file is empty".to_string(),
            });
        }

        let columns = df.get_column_names();
        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|c| !columns.contains(c))
            .map(|c| c.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(DataError::MissingColumns {
                name: name.to_string(),
                missing,
            });
        }

        let file_schema = schema::classify_columns(df, self.options.catalog.as_deref());

        let years = int_column(df, "Year")?;
        let weeks = int_column(df, "Week")?;
        let months = month_column(df)?;
        let products = string_column(df, "Product")?;
        let totals = float_column(df, "Total")?;

        let mut restaurant_values: Vec<(String, Vec<Option<f64>>)> =
            Vec::with_capacity(file_schema.restaurants.len());
        for restaurant in &file_schema.restaurants {
            restaurant_values.push((restaurant.clone(), float_column(df, restaurant)?));
        }
        schema.merge(&file_schema);

        let mut rows = Vec::with_capacity(df.height());
        let mut dropped = 0usize;

        for i in 0..df.height() {
            let candidate = (
                years[i],
                weeks[i],
                months[i],
                products[i].as_deref(),
                totals[i],
            );
            let (Some(year), Some(week), Some(month), Some(product), Some(total)) = candidate
            else {
                dropped += 1;
                continue;
            };
            if !(1..=53).contains(&week) || !(1..=12).contains(&month) {
                dropped += 1;
                continue;
            }

            let mut by_restaurant = BTreeMap::new();
            for (restaurant, values) in &restaurant_values {
                // Negative per-restaurant cells are contributions that
                // cannot exist; treat them as not reported.
                if let Some(v) = values[i].filter(|v| *v >= 0.0) {
                    by_restaurant.insert(restaurant.clone(), v);
                }
            }

            rows.push(SalesRecord {
                year: year as i32,
                week: week as u32,
                month: month as u32,
                product: product.to_string(),
                total,
                by_restaurant,
            });
        }

        if dropped > 0 {
            warn!(file = %name, count = dropped, "dropped rows with unusable required fields");
        }

        Ok((rows, dropped))
    }
}

fn read_csv(path: &Path) -> Result<DataFrame> {
    let file = File::open(path)?;
    // Use polars DataFrame reader directly
    let df = CsvReader::new(file)
        .infer_schema(None)
        .has_header(true)
        .finish()?;
    Ok(df)
}

/// Remove duplicate (year, week, product) keys per the chosen policy.
fn dedupe(
    rows: Vec<SalesRecord>,
    policy: DedupPolicy,
    report: &mut LoadReport,
) -> Result<Vec<SalesRecord>> {
    let before = rows.len();
    let mut index: HashMap<(i32, u32, String), usize> = HashMap::with_capacity(rows.len());
    let mut kept: Vec<SalesRecord> = Vec::with_capacity(rows.len());

    for row in rows {
        let key = (row.year, row.week, row.product.clone());
        match index.get(&key) {
            None => {
                index.insert(key, kept.len());
                kept.push(row);
            }
            Some(&at) => match policy {
                DedupPolicy::FirstWins => {}
                DedupPolicy::LastWins => kept[at] = row,
                DedupPolicy::RejectConflict => {
                    if kept[at] != row {
                        return Err(DataError::DuplicateConflict {
                            year: row.year,
                            week: row.week,
                            product: row.product,
                        });
                    }
                }
            },
        }
    }

    report.duplicate_rows = before - kept.len();
    if report.duplicate_rows > 0 {
        warn!(count = report.duplicate_rows, "removed duplicate (year, week, product) rows");
    }
    Ok(kept)
}

/// Extract a column as nullable integers, parsing strings and accepting
/// whole-valued floats.
fn int_column(df: &DataFrame, name: &str) -> Result<Vec<Option<i64>>> {
    let col = df.column(name)?;
    let values = match col.dtype() {
        DataType::Int64 => col.i64()?.into_iter().collect(),
        DataType::Int32 => col.i32()?.into_iter().map(|v| v.map(i64::from)).collect(),
        DataType::UInt64 => col
            .u64()?
            .into_iter()
            .map(|v| v.map(|v| v as i64))
            .collect(),
        DataType::UInt32 => col.u32()?.into_iter().map(|v| v.map(i64::from)).collect(),
        DataType::Float64 => col
            .f64()?
            .into_iter()
            .map(|v| v.filter(|f| f.fract() == 0.0).map(|f| f as i64))
            .collect(),
        DataType::Float32 => col
            .f32()?
            .into_iter()
            .map(|v| v.filter(|f| f.fract() == 0.0).map(|f| f as i64))
            .collect(),
        DataType::Utf8 => col
            .utf8()?
            .into_iter()
            .map(|v| v.and_then(|s| s.trim().parse::<i64>().ok()))
            .collect(),
        other => {
            return Err(DataError::ColumnCoercion {
                column: name.to_string(),
                reason: format!("unsupported dtype {other:?} for an integer column"),
            })
        }
    };
    Ok(values)
}

/// Extract a column as nullable floats, parsing strings.
fn float_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let col = df.column(name)?;
    let values = match col.dtype() {
        DataType::Float64 => col.f64()?.into_iter().collect(),
        DataType::Float32 => col
            .f32()?
            .into_iter()
            .map(|v| v.map(f64::from))
            .collect(),
        DataType::Int64 => col
            .i64()?
            .into_iter()
            .map(|v| v.map(|v| v as f64))
            .collect(),
        DataType::Int32 => col.i32()?.into_iter().map(|v| v.map(f64::from)).collect(),
        DataType::UInt64 => col
            .u64()?
            .into_iter()
            .map(|v| v.map(|v| v as f64))
            .collect(),
        DataType::UInt32 => col.u32()?.into_iter().map(|v| v.map(f64::from)).collect(),
        DataType::Utf8 => col
            .utf8()?
            .into_iter()
            .map(|v| v.and_then(|s| s.trim().parse::<f64>().ok()))
            .collect(),
        other => {
            return Err(DataError::ColumnCoercion {
                column: name.to_string(),
                reason: format!("unsupported dtype {other:?} for a numeric column"),
            })
        }
    };
    Ok(values)
}

/// Extract a column as nullable trimmed strings.
fn string_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let col = df.column(name)?;
    let col = if col.dtype() == &DataType::Utf8 {
        col.clone()
    } else {
        col.cast(&DataType::Utf8)?
    };
    let values = col
        .utf8()?
        .into_iter()
        .map(|v| {
            v.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        })
        .collect();
    Ok(values)
}

/// The Month column: textual month names mapped through the bilingual
/// table, or already-numeric months passed through when in range.
fn month_column(df: &DataFrame) -> Result<Vec<Option<i64>>> {
    let col = df.column("Month")?;
    if col.dtype() == &DataType::Utf8 {
        let values = col
            .utf8()?
            .into_iter()
            .map(|v| v.and_then(schema::month_number).map(i64::from))
            .collect();
        Ok(values)
    } else {
        let values = int_column(df, "Month")?
            .into_iter()
            .map(|v| v.filter(|m| (1..=12).contains(m)))
            .collect();
        Ok(values)
    }
}
