use demand_forecast::engine::forecast_demand;
use demand_forecast::series::WeeklySeries;
use sales_data::utils::generate_test_table;
use sales_data::{aggregate, DatedSeriesPoint};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Demand Forecast: Basic Forecasting Example");
    println!("==========================================\n");

    // Create sample data
    println!("Creating sample weekly sales...");
    let table = generate_test_table(
        &["Beef Patty Prep", "Chili Sauce"],
        &["Riverside Mall", "Harbor Point"],
        2024,
        26,
        140.0,
        42,
    );
    println!("Sample data created: {} cleaned rows\n", table.len());

    let aggregated = aggregate(&table)?;

    // Forecast the chain-wide series of one product
    println!("Forecasting chain-wide demand...");
    let points = aggregated.product_total_series("Beef Patty Prep");
    let series = WeeklySeries::new(points)?;
    let forecast = forecast_demand(&series, 4)?;

    println!("Model: {}", forecast.model());
    for (date, value) in forecast.rounded() {
        println!("  {date}: {value} kg");
    }
    println!(
        "Four-week purchasing total: {} kg\n",
        forecast.rounded_total()
    );

    // Peek at the aggregated history backing the forecast
    println!("Last four observed weeks:");
    let history: Vec<&DatedSeriesPoint> = aggregated
        .product_points("Beef Patty Prep")
        .collect();
    for point in history.iter().rev().take(4).rev() {
        println!("  {}: {:.1} kg", point.date, point.total);
    }

    println!("\nForecasting complete!");
    Ok(())
}
