// A quick tour of the ChainBoard library crates: generate synthetic
// weekly sales, aggregate them, forecast demand, and run the pure-math
// purchasing helpers.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("ChainBoard quick tour\n");

    // 1. Synthetic cleaned sales: two products, two restaurants.
    let table = sales_data::utils::generate_test_table(
        &["Beef Patty Prep", "Chili Sauce"],
        &["Riverside Mall", "Harbor Point"],
        2024,
        20,
        120.0,
        11,
    );
    println!(
        "Cleaned table: {} rows, {} restaurant columns",
        table.len(),
        table.restaurants().len()
    );

    // 2. Aggregate to one point per (date, product).
    let aggregated = sales_data::aggregate(&table)?;
    println!("Aggregated points: {}", aggregated.points.len());

    // 3. Forecast one product chain-wide.
    let series = demand_forecast::WeeklySeries::new(
        aggregated.product_total_series("Beef Patty Prep"),
    )?;
    let forecast = demand_forecast::forecast_demand(&series, 2)?;
    println!(
        "Two-week forecast for Beef Patty Prep: {} units ({})",
        forecast.rounded_total(),
        forecast.model()
    );

    // 4. Batch pivot across every (product, restaurant) pair.
    let pivot = demand_forecast::batch_forecast(&aggregated, &aggregated.restaurants, 2)?;
    for (product, cells) in pivot.rows() {
        println!("  {product}: {cells:?}");
    }

    // 5. Portion math over the last observed week.
    let weights = std::collections::BTreeMap::from([
        ("Beef Patty Prep".to_string(), 0.2),
        ("Chili Sauce".to_string(), 0.02),
    ]);
    let week_totals: Vec<(String, f64)> = table
        .records
        .iter()
        .filter(|r| r.week == 20)
        .map(|r| (r.product.clone(), r.total))
        .collect();
    for row in portion_math::portions::portion_breakdown(&week_totals, &weights)? {
        println!(
            "  {}: {:.0} kg -> {} portions",
            row.product, row.total_kg, row.portions
        );
    }

    println!("\nDone.");
    Ok(())
}
