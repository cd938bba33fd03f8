use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rstest::rstest;
use sales_data::{aggregate, CleanedTable, DataError, SalesRecord, TableSchema};

fn record(
    year: i32,
    week: u32,
    product: &str,
    total: f64,
    by_restaurant: &[(&str, f64)],
) -> SalesRecord {
    SalesRecord {
        year,
        week,
        month: 1,
        product: product.to_string(),
        total,
        by_restaurant: by_restaurant
            .iter()
            .map(|(name, v)| (name.to_string(), *v))
            .collect(),
    }
}

fn table(records: Vec<SalesRecord>, restaurants: &[&str]) -> CleanedTable {
    CleanedTable {
        records,
        schema: TableSchema {
            restaurants: restaurants.iter().map(|r| r.to_string()).collect(),
            ignored: Vec::new(),
        },
        report: Default::default(),
    }
}

#[test]
fn test_groups_sum_totals_and_restaurant_columns() {
    let cleaned = table(
        vec![
            record(2024, 1, "Beef", 100.0, &[("R1", 40.0), ("R2", 60.0)]),
            record(2024, 2, "Beef", 80.0, &[("R1", 80.0)]),
            record(2024, 1, "Chili", 30.0, &[("R2", 30.0)]),
        ],
        &["R1", "R2"],
    );

    let aggregated = aggregate(&cleaned).unwrap();

    assert_eq!(aggregated.points.len(), 3);
    assert_eq!(aggregated.products, ["Beef", "Chili"]);

    // The sum over every group must equal the sum over every record.
    let grouped: f64 = aggregated.points.iter().map(|p| p.total).sum();
    let raw: f64 = cleaned.records.iter().map(|r| r.total).sum();
    assert_eq!(grouped, raw);

    let beef_week1 = &aggregated.points[0];
    assert_eq!(beef_week1.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    assert_eq!(beef_week1.by_restaurant.get("R1"), Some(&40.0));
    assert_eq!(beef_week1.by_restaurant.get("R2"), Some(&60.0));

    // R2 never reported Beef in week 2: the key must be absent, not 0.
    let beef_week2 = &aggregated.points[1];
    assert_eq!(beef_week2.by_restaurant.get("R2"), None);
}

#[test]
fn test_points_sorted_by_product_then_date() {
    let cleaned = table(
        vec![
            record(2024, 3, "Chili", 1.0, &[]),
            record(2024, 1, "Chili", 2.0, &[]),
            record(2024, 2, "Beef", 3.0, &[]),
        ],
        &[],
    );

    let aggregated = aggregate(&cleaned).unwrap();
    let order: Vec<(&str, NaiveDate)> = aggregated
        .points
        .iter()
        .map(|p| (p.product.as_str(), p.date))
        .collect();

    assert_eq!(
        order,
        vec![
            ("Beef", NaiveDate::from_ymd_opt(2024, 1, 8).unwrap()),
            ("Chili", NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
            ("Chili", NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()),
        ]
    );
}

#[rstest]
#[case(2023, 53)] // 2023 has only 52 ISO weeks
#[case(2024, 0)]
#[case(2024, 54)]
fn test_invalid_iso_week_aborts_aggregation(#[case] year: i32, #[case] week: u32) {
    let cleaned = table(vec![record(year, week, "Beef", 10.0, &[])], &[]);

    let result = aggregate(&cleaned);
    assert!(matches!(result, Err(DataError::InvalidIsoWeek { .. })));
}

#[test]
fn test_series_accessors() {
    let cleaned = table(
        vec![
            record(2024, 1, "Beef", 100.0, &[("R1", 40.0)]),
            record(2024, 2, "Beef", 90.0, &[]),
            record(2024, 3, "Beef", 80.0, &[("R1", 30.0)]),
        ],
        &["R1"],
    );
    let aggregated = aggregate(&cleaned).unwrap();

    let totals = aggregated.product_total_series("Beef");
    assert_eq!(totals.len(), 3);
    assert_eq!(totals[0].1, 100.0);

    // Weeks without a report for R1 are omitted from the pair series.
    let pair = aggregated.pair_series("Beef", "R1");
    assert_eq!(pair.len(), 2);
    assert_eq!(
        pair.iter().map(|(_, v)| *v).collect::<Vec<_>>(),
        vec![40.0, 30.0]
    );

    assert!(aggregated.pair_series("Beef", "R9").is_empty());
    assert!(aggregated.product_total_series("Nope").is_empty());
}
