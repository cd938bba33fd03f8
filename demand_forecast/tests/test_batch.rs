use std::collections::BTreeMap;

use demand_forecast::batch::batch_forecast;
use demand_forecast::engine::forecast_demand;
use demand_forecast::series::WeeklySeries;
use demand_forecast::ForecastError;
use pretty_assertions::assert_eq;
use sales_data::{aggregate, AggregatedTable, CleanedTable, SalesRecord, TableSchema};

/// Build an aggregated table where each (product, restaurant, value)
/// triple repeats for `weeks` consecutive weeks of 2024.
fn aggregated(entries: &[(&str, &[(&str, f64)], u32)], restaurants: &[&str]) -> AggregatedTable {
    let mut records = Vec::new();
    for (product, by_restaurant, weeks) in entries {
        for week in 1..=*weeks {
            let map: BTreeMap<String, f64> = by_restaurant
                .iter()
                .map(|(name, v)| (name.to_string(), *v))
                .collect();
            records.push(SalesRecord {
                year: 2024,
                week,
                month: 1,
                product: product.to_string(),
                total: map.values().sum(),
                by_restaurant: map,
            });
        }
    }

    let cleaned = CleanedTable {
        records,
        schema: TableSchema {
            restaurants: restaurants.iter().map(|r| r.to_string()).collect(),
            ignored: Vec::new(),
        },
        report: Default::default(),
    };
    aggregate(&cleaned).unwrap()
}

#[test]
fn test_pivot_is_complete_and_zero_filled() {
    // B was never sold at R2: its cell must be 0, not absent, and the
    // rest of the batch still completes.
    let table = aggregated(
        &[("A", &[("R1", 10.0)], 8), ("B", &[("R1", 4.0)], 8)],
        &["R1", "R2"],
    );
    let restaurants = table.restaurants.clone();

    let pivot = batch_forecast(&table, &restaurants, 2).unwrap();

    assert_eq!(pivot.products(), ["A", "B"]);
    assert_eq!(pivot.restaurants(), ["R1", "R2"]);
    assert_eq!(pivot.cell("A", "R1"), Some(20));
    assert_eq!(pivot.cell("A", "R2"), Some(0));
    assert_eq!(pivot.cell("B", "R1"), Some(8));
    assert_eq!(pivot.cell("B", "R2"), Some(0));

    for (_, row) in pivot.rows() {
        assert_eq!(row.len(), 2);
    }
}

#[test]
fn test_pivot_cell_matches_the_engine_total() {
    let table = aggregated(&[("A", &[("R1", 10.0)], 8)], &["R1"]);
    let restaurants = table.restaurants.clone();

    let pivot = batch_forecast(&table, &restaurants, 2).unwrap();

    let series = WeeklySeries::new(table.pair_series("A", "R1")).unwrap();
    let expected = forecast_demand(&series, 2).unwrap().rounded_total();
    assert_eq!(pivot.cell("A", "R1"), Some(expected));
}

#[test]
fn test_fit_failures_leave_zero_without_aborting() {
    // C has two weeks of history, below the engine minimum: its fit
    // fails, its cell is 0, and A still forecasts normally.
    let table = aggregated(
        &[("A", &[("R1", 10.0)], 8), ("C", &[("R1", 7.0)], 2)],
        &["R1"],
    );
    let restaurants = table.restaurants.clone();

    let pivot = batch_forecast(&table, &restaurants, 2).unwrap();

    assert_eq!(pivot.cell("A", "R1"), Some(20));
    assert_eq!(pivot.cell("C", "R1"), Some(0));
}

#[test]
fn test_unknown_labels_return_none() {
    let table = aggregated(&[("A", &[("R1", 10.0)], 8)], &["R1"]);
    let restaurants = table.restaurants.clone();
    let pivot = batch_forecast(&table, &restaurants, 2).unwrap();

    assert_eq!(pivot.cell("A", "Nowhere"), None);
    assert_eq!(pivot.cell("Nothing", "R1"), None);
}

#[test]
fn test_zero_horizon_is_rejected() {
    let table = aggregated(&[("A", &[("R1", 10.0)], 8)], &["R1"]);
    let restaurants = table.restaurants.clone();

    assert!(matches!(
        batch_forecast(&table, &restaurants, 0),
        Err(ForecastError::InvalidHorizon(0))
    ));
}
