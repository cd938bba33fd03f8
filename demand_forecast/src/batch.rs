//! Batch orchestration: one forecast per (product, restaurant) pair

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::warn;

use sales_data::AggregatedTable;

use crate::engine::forecast_demand;
use crate::error::{ForecastError, Result};
use crate::series::WeeklySeries;

/// Product-by-restaurant pivot of integer forecast totals.
///
/// The grid is always complete: one row per product, one column per
/// requested restaurant. A cell is 0 when the pair had no history or
/// its fit failed — the one place where "no data" and "zero" merge,
/// because the purchasing view needs a full rectangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPivot {
    products: Vec<String>,
    restaurants: Vec<String>,
    /// cells[product_index][restaurant_index]
    cells: Vec<Vec<i64>>,
}

impl ForecastPivot {
    pub fn products(&self) -> &[String] {
        &self.products
    }

    pub fn restaurants(&self) -> &[String] {
        &self.restaurants
    }

    /// Cell lookup by name; None only for unknown labels.
    pub fn cell(&self, product: &str, restaurant: &str) -> Option<i64> {
        let row = self.products.iter().position(|p| p == product)?;
        let col = self.restaurants.iter().position(|r| r == restaurant)?;
        Some(self.cells[row][col])
    }

    /// Iterate rows as (product, cells-in-restaurant-order).
    pub fn rows(&self) -> impl Iterator<Item = (&str, &[i64])> {
        self.products
            .iter()
            .map(|p| p.as_str())
            .zip(self.cells.iter().map(|row| row.as_slice()))
    }
}

/// Fit every (product, restaurant) pair and assemble the pivot.
///
/// Pairs are independent model fits and run on rayon's worker pool; the
/// assembled pivot does not depend on completion order. A pair with no
/// history is skipped silently (a restaurant that never sold the
/// product is expected); a fit failure is logged and skipped. Either
/// way the cell stays 0 and the batch always completes.
pub fn batch_forecast(
    table: &AggregatedTable,
    restaurants: &[String],
    horizon: usize,
) -> Result<ForecastPivot> {
    if horizon == 0 {
        return Err(ForecastError::InvalidHorizon(horizon));
    }

    let products = table.products.clone();
    let jobs: Vec<(usize, usize)> = (0..products.len())
        .flat_map(|p| (0..restaurants.len()).map(move |r| (p, r)))
        .collect();

    let fitted: Vec<(usize, usize, f64)> = jobs
        .into_par_iter()
        .filter_map(|(p, r)| {
            fit_pair(table, &products[p], &restaurants[r], horizon)
                .map(|total| (p, r, total))
        })
        .collect();

    let mut cells = vec![vec![0i64; restaurants.len()]; products.len()];
    for (p, r, total) in fitted {
        cells[p][r] = total.round().max(0.0) as i64;
    }

    Ok(ForecastPivot {
        products,
        restaurants: restaurants.to_vec(),
        cells,
    })
}

/// Forecast one pair, returning the horizon total, or None when the
/// pair contributes nothing to the pivot.
fn fit_pair(
    table: &AggregatedTable,
    product: &str,
    restaurant: &str,
    horizon: usize,
) -> Option<f64> {
    let points = table.pair_series(product, restaurant);
    if points.is_empty() {
        return None;
    }

    let series = match WeeklySeries::new(points) {
        Ok(series) => series,
        Err(err) => {
            warn!(%product, %restaurant, error = %err, "unusable pair series, skipping");
            return None;
        }
    };

    match forecast_demand(&series, horizon) {
        Ok(forecast) => Some(forecast.horizon_total()),
        Err(err) => {
            warn!(%product, %restaurant, error = %err, "pair fit failed, skipping");
            None
        }
    }
}
