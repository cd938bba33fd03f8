use demand_forecast::batch::batch_forecast;
use sales_data::utils::generate_test_table;
use sales_data::aggregate;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Demand Forecast: Batch Pivot Example");
    println!("====================================\n");

    let table = generate_test_table(
        &["Beef Patty Prep", "Chili Sauce", "Pesto Sauce"],
        &["Riverside Mall", "Harbor Point", "Old Town Square"],
        2024,
        16,
        90.0,
        7,
    );
    let aggregated = aggregate(&table)?;
    let restaurants = aggregated.restaurants.clone();

    println!(
        "Fitting {} (product, restaurant) pairs in parallel...\n",
        aggregated.products.len() * restaurants.len()
    );
    let pivot = batch_forecast(&aggregated, &restaurants, 2)?;

    // Print the pivot: rows = products, columns = restaurants
    print!("{:<18}", "Product");
    for restaurant in pivot.restaurants() {
        print!("{restaurant:>18}");
    }
    println!();
    for (product, cells) in pivot.rows() {
        print!("{product:<18}");
        for cell in cells {
            print!("{cell:>18}");
        }
        println!();
    }

    println!("\nEvery cell is a two-week forecast total; 0 means the pair had no history.");
    Ok(())
}
