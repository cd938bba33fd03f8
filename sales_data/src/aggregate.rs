//! Weekly aggregation: cleaned records to per-(date, product) series.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::iso_week_monday;
use crate::error::Result;
use crate::table::CleanedTable;

/// One aggregated point: all sales of one product in the week starting
/// at `date` (the ISO-week Monday).
///
/// A restaurant key is present iff at least one record in the group
/// reported that column; absence is "not reported", not zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatedSeriesPoint {
    pub date: NaiveDate,
    pub product: String,
    pub total: f64,
    pub by_restaurant: BTreeMap<String, f64>,
}

/// The aggregated table: one point per (date, product), sorted by
/// product, then date ascending.
#[derive(Debug, Clone, Default)]
pub struct AggregatedTable {
    pub points: Vec<DatedSeriesPoint>,
    /// Distinct products, sorted
    pub products: Vec<String>,
    /// Restaurant columns carried over from the cleaned table's schema
    pub restaurants: Vec<String>,
}

impl AggregatedTable {
    /// All points for one product, in date order.
    pub fn product_points<'a>(
        &'a self,
        product: &'a str,
    ) -> impl Iterator<Item = &'a DatedSeriesPoint> {
        self.points.iter().filter(move |p| p.product == product)
    }

    /// The chain-wide weekly series for one product.
    pub fn product_total_series(&self, product: &str) -> Vec<(NaiveDate, f64)> {
        self.product_points(product)
            .map(|p| (p.date, p.total))
            .collect()
    }

    /// The weekly series of one restaurant column for one product.
    /// Weeks where the restaurant did not report are omitted.
    pub fn pair_series(&self, product: &str, restaurant: &str) -> Vec<(NaiveDate, f64)> {
        self.product_points(product)
            .filter_map(|p| p.by_restaurant.get(restaurant).map(|v| (p.date, *v)))
            .collect()
    }
}

/// Group the cleaned table by (date, product), summing the total and
/// every restaurant column present in each group.
///
/// Date derivation happens here; an invalid (year, week) pair aborts
/// the whole aggregation, since a record without a date would silently
/// corrupt the grouping.
pub fn aggregate(table: &CleanedTable) -> Result<AggregatedTable> {
    let mut groups: BTreeMap<(String, NaiveDate), (f64, BTreeMap<String, f64>)> =
        BTreeMap::new();

    for record in &table.records {
        let date = iso_week_monday(record.year, record.week)?;
        let entry = groups
            .entry((record.product.clone(), date))
            .or_insert_with(|| (0.0, BTreeMap::new()));
        entry.0 += record.total;
        for (restaurant, value) in &record.by_restaurant {
            *entry.1.entry(restaurant.clone()).or_insert(0.0) += value;
        }
    }

    let points: Vec<DatedSeriesPoint> = groups
        .into_iter()
        .map(|((product, date), (total, by_restaurant))| DatedSeriesPoint {
            date,
            product,
            total,
            by_restaurant,
        })
        .collect();

    let mut products: Vec<String> = points.iter().map(|p| p.product.clone()).collect();
    products.sort();
    products.dedup();

    Ok(AggregatedTable {
        points,
        products,
        restaurants: table.schema.restaurants.clone(),
    })
}
