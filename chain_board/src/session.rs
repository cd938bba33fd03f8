//! Session state: the cleaned table and everything derived from it.
//!
//! One `SessionState` is built per run and owns the data; views borrow
//! it read-only. Replacing the cleaned table goes through
//! [`SessionState::set_cleaned_table`], which re-derives the aggregate,
//! so the two can never drift apart.

use std::path::Path;

use anyhow::Context;

use sales_data::{aggregate, AggregatedTable, CleanedTable, LoadOptions, SalesLoader};

use crate::config::AppConfig;

#[derive(Debug)]
pub struct SessionState {
    config: AppConfig,
    cleaned: CleanedTable,
    aggregated: AggregatedTable,
}

impl SessionState {
    /// Load and clean the given CSV files under the config's catalog.
    pub fn load<P: AsRef<Path>>(paths: &[P], config: AppConfig) -> anyhow::Result<Self> {
        let loader = SalesLoader::with_options(LoadOptions {
            dedup: Default::default(),
            catalog: config.restaurant_catalog(),
        });
        let cleaned = loader
            .from_csv_paths(paths)
            .context("failed to load sales data")?;
        Self::from_cleaned(cleaned, config)
    }

    /// Build a session around an already-cleaned table.
    pub fn from_cleaned(cleaned: CleanedTable, config: AppConfig) -> anyhow::Result<Self> {
        let aggregated = aggregate(&cleaned).context("failed to aggregate sales data")?;
        Ok(Self {
            config,
            cleaned,
            aggregated,
        })
    }

    /// Replace the cleaned table, re-deriving the aggregate.
    pub fn set_cleaned_table(&mut self, cleaned: CleanedTable) -> anyhow::Result<()> {
        self.aggregated = aggregate(&cleaned).context("failed to aggregate sales data")?;
        self.cleaned = cleaned;
        Ok(())
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn cleaned(&self) -> &CleanedTable {
        &self.cleaned
    }

    pub fn aggregated(&self) -> &AggregatedTable {
        &self.aggregated
    }

    /// Per-product total weight for one (year, week), for the portion
    /// view. Fails when the period has no rows at all.
    pub fn product_period_totals(
        &self,
        year: i32,
        week: u32,
    ) -> anyhow::Result<Vec<(String, f64)>> {
        let mut totals: Vec<(String, f64)> = Vec::new();
        for record in &self.cleaned.records {
            if record.year != year || record.week != week {
                continue;
            }
            match totals.iter_mut().find(|(p, _)| p == &record.product) {
                Some((_, sum)) => *sum += record.total,
                None => totals.push((record.product.clone(), record.total)),
            }
        }

        if totals.is_empty() {
            anyhow::bail!("no data for year {year}, week {week}");
        }
        totals.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(totals)
    }

    /// Average weekly sales per analysis product: chain-wide from the
    /// Total column, or from one restaurant's column counting only the
    /// weeks it reported sales.
    pub fn base_weekly_sales(
        &self,
        restaurant: Option<&str>,
    ) -> anyhow::Result<Vec<(String, f64)>> {
        if let Some(name) = restaurant {
            if !self.cleaned.schema.restaurants.iter().any(|r| r == name) {
                anyhow::bail!("'{name}' is not a restaurant column in this data");
            }
        }

        let mut sums: Vec<(String, f64, usize)> = Vec::new();
        for record in &self.cleaned.records {
            if !self.config.is_analysis_product(&record.product) {
                continue;
            }
            let value = match restaurant {
                None => record.total,
                Some(name) => match record.by_restaurant.get(name) {
                    Some(v) if *v > 0.0 => *v,
                    _ => continue,
                },
            };
            match sums.iter_mut().find(|(p, _, _)| p == &record.product) {
                Some((_, sum, n)) => {
                    *sum += value;
                    *n += 1;
                }
                None => sums.push((record.product.clone(), value, 1)),
            }
        }

        if sums.is_empty() {
            anyhow::bail!("no analysis products in the loaded data");
        }

        let mut base: Vec<(String, f64)> = sums
            .into_iter()
            .map(|(product, sum, n)| (product, sum / n as f64))
            .collect();
        base.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(base)
    }
}
