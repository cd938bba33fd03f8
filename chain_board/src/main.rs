use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use chain_board::chat::{self, ChatFilter};
use chain_board::config::AppConfig;
use chain_board::export::{self, Cell};
use chain_board::reports::{build_report, ReportKind};
use chain_board::session::SessionState;
use chain_board::{dynamics, seasonal};
use demand_forecast::batch::batch_forecast;
use demand_forecast::engine::forecast_demand;
use demand_forecast::series::WeeklySeries;
use portion_math::portions::portion_breakdown;
use portion_math::scenario::{project_scenario, ScenarioParameters};

#[derive(Parser)]
#[command(name = "chain-board")]
#[command(about = "Analytics and demand forecasting for a restaurant chain", long_about = None)]
struct Cli {
    /// Weekly sales CSV files to load
    #[arg(long = "csv", required = true, num_args = 1..)]
    csv: Vec<PathBuf>,

    /// Optional TOML config with the catalog and chat settings
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show what was loaded: schema, products, cleaning warnings
    Inspect,
    /// Forecast one product, chain-wide or for one restaurant
    Forecast {
        #[arg(long)]
        product: String,
        #[arg(long)]
        restaurant: Option<String>,
        #[arg(long, default_value_t = 2)]
        horizon: usize,
    },
    /// Forecast every (product, restaurant) pair into a pivot table
    BatchForecast {
        #[arg(long, default_value_t = 2)]
        horizon: usize,
        /// Export the pivot as an xlsx file
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Portion counts for one reporting week
    Portions {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        week: u32,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Project a what-if scenario over base weekly sales
    Scenario {
        /// Restrict base sales to one restaurant column
        #[arg(long)]
        restaurant: Option<String>,
        /// Per-product price change, as "Product=pct" (repeatable)
        #[arg(long = "price-change")]
        price_change: Vec<String>,
        /// One price change applied to every product
        #[arg(long)]
        price_change_all: Option<f64>,
        #[arg(long, default_value_t = 0.0)]
        portion_change: f64,
        #[arg(long, default_value_t = 0)]
        new_restaurants: u32,
        #[arg(long, default_value_t = 0.0)]
        promo_uplift: f64,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Build a report table for one year
    Report {
        #[arg(long)]
        year: i32,
        #[arg(long, value_enum)]
        kind: ReportKind,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Seasonal trend breakdown for one year
    Seasonal {
        #[arg(long)]
        year: i32,
    },
    /// Sales dynamics of one product at one restaurant
    Dynamics {
        #[arg(long)]
        restaurant: String,
        #[arg(long)]
        product: String,
        #[arg(long)]
        year: i32,
    },
    /// Ask the external model a question about the filtered data
    Ask {
        #[arg(long)]
        restaurant: String,
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        product: Option<String>,
        #[arg(long)]
        question: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load_or_default(cli.config.as_deref())?;
    init_tracing(&config);

    let session = SessionState::load(&cli.csv, config)?;

    match cli.command {
        Commands::Inspect => inspect(&session),
        Commands::Forecast {
            product,
            restaurant,
            horizon,
        } => forecast(&session, &product, restaurant.as_deref(), horizon)?,
        Commands::BatchForecast { horizon, out } => batch(&session, horizon, out)?,
        Commands::Portions { year, week, out } => portions(&session, year, week, out)?,
        Commands::Scenario {
            restaurant,
            price_change,
            price_change_all,
            portion_change,
            new_restaurants,
            promo_uplift,
            out,
        } => scenario(
            &session,
            restaurant.as_deref(),
            &price_change,
            price_change_all,
            portion_change,
            new_restaurants,
            promo_uplift,
            out,
        )?,
        Commands::Report { year, kind, out } => report(&session, kind, year, out)?,
        Commands::Seasonal { year } => seasonal_view(&session, year)?,
        Commands::Dynamics {
            restaurant,
            product,
            year,
        } => dynamics_view(&session, &restaurant, &product, year)?,
        Commands::Ask {
            restaurant,
            year,
            product,
            question,
        } => {
            let filter = ChatFilter {
                restaurant: &restaurant,
                year,
                product: product.as_deref(),
            };
            ask(&session, &filter, &question).await?;
        }
    }

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn inspect(session: &SessionState) {
    let cleaned = session.cleaned();
    println!("Loaded {} cleaned rows.", cleaned.len());
    println!("Years: {:?}", cleaned.years());
    println!("Products ({}):", cleaned.products().len());
    for product in cleaned.products() {
        println!("- {product}");
    }
    println!("Restaurant columns ({}):", cleaned.restaurants().len());
    for restaurant in cleaned.restaurants() {
        println!("- {restaurant}");
    }
    if !cleaned.schema.ignored.is_empty() {
        println!("Ignored columns: {:?}", cleaned.schema.ignored);
    }

    let report = &cleaned.report;
    for (file, reason) in &report.skipped_files {
        println!("warning: skipped {file}: {reason}");
    }
    for (file, dropped) in &report.dropped_rows {
        if *dropped > 0 {
            println!("warning: dropped {dropped} rows from {file}");
        }
    }
    if report.duplicate_rows > 0 {
        println!("warning: removed {} duplicate rows", report.duplicate_rows);
    }
    if report.negative_totals > 0 {
        println!(
            "warning: removed {} rows with negative totals",
            report.negative_totals
        );
    }
}

fn forecast(
    session: &SessionState,
    product: &str,
    restaurant: Option<&str>,
    horizon: usize,
) -> anyhow::Result<()> {
    let aggregated = session.aggregated();
    let points = match restaurant {
        None => aggregated.product_total_series(product),
        Some(name) => aggregated.pair_series(product, name),
    };
    if points.is_empty() {
        anyhow::bail!(
            "no history for product '{product}'{}",
            restaurant
                .map(|r| format!(" at '{r}'"))
                .unwrap_or_default()
        );
    }

    let series = WeeklySeries::new(points)?;
    let forecast = forecast_demand(&series, horizon)?;

    let scope = restaurant.unwrap_or("the whole chain");
    println!(
        "Forecast for '{product}' at {scope}, {horizon} week(s) [{}]:",
        forecast.model()
    );
    for (date, value) in forecast.rounded() {
        println!("- {date}: {value}");
    }
    println!("Horizon total: {}", forecast.rounded_total());
    Ok(())
}

fn batch(session: &SessionState, horizon: usize, out: Option<PathBuf>) -> anyhow::Result<()> {
    let aggregated = session.aggregated();
    if aggregated.restaurants.is_empty() {
        anyhow::bail!("no restaurant columns in the loaded data, nothing to pivot");
    }

    let pivot = batch_forecast(aggregated, &aggregated.restaurants, horizon)?;

    print!("{:<28}", "Product");
    for restaurant in pivot.restaurants() {
        print!("{restaurant:>24}");
    }
    println!();
    for (product, cells) in pivot.rows() {
        print!("{product:<28}");
        for cell in cells {
            print!("{cell:>24}");
        }
        println!();
    }

    if let Some(path) = out {
        export::save_pivot(&path, &pivot)?;
        println!("Pivot written to {}.", path.display());
    }
    Ok(())
}

fn portions(
    session: &SessionState,
    year: i32,
    week: u32,
    out: Option<PathBuf>,
) -> anyhow::Result<()> {
    let totals = session.product_period_totals(year, week)?;
    let weights = &session.config().catalog.portion_weights_kg;
    if weights.is_empty() {
        anyhow::bail!("no portion weights configured, add [catalog.portion_weights_kg]");
    }

    let rows = portion_breakdown(&totals, weights)?;
    if rows.is_empty() {
        anyhow::bail!("no cataloged products sold in year {year}, week {week}");
    }

    println!("Portions for {year} week {week}:");
    for row in &rows {
        println!(
            "- {}: {:.0} kg / {} kg per portion = {} portions",
            row.product, row.total_kg, row.portion_kg, row.portions
        );
    }

    if let Some(path) = out {
        let headers: Vec<String> = ["Product", "Total kg", "Portion kg", "Portions"]
            .map(String::from)
            .to_vec();
        let cells: Vec<Vec<Cell>> = rows
            .iter()
            .map(|row| {
                vec![
                    Cell::Text(row.product.clone()),
                    Cell::Float(row.total_kg),
                    Cell::Float(row.portion_kg),
                    Cell::Int(row.portions as i64),
                ]
            })
            .collect();
        export::save_table(&path, "Portions", &headers, &cells)?;
        println!("Portion report written to {}.", path.display());
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn scenario(
    session: &SessionState,
    restaurant: Option<&str>,
    price_change: &[String],
    price_change_all: Option<f64>,
    portion_change: f64,
    new_restaurants: u32,
    promo_uplift: f64,
    out: Option<PathBuf>,
) -> anyhow::Result<()> {
    let base = session.base_weekly_sales(restaurant)?;

    let mut price_change_pct: BTreeMap<String, f64> = BTreeMap::new();
    if let Some(pct) = price_change_all {
        for (product, _) in &base {
            price_change_pct.insert(product.clone(), pct);
        }
    }
    for entry in price_change {
        let (product, pct) = entry
            .split_once('=')
            .with_context(|| format!("expected Product=pct, got '{entry}'"))?;
        let pct: f64 = pct
            .trim()
            .parse()
            .with_context(|| format!("'{pct}' is not a number in '{entry}'"))?;
        price_change_pct.insert(product.trim().to_string(), pct);
    }

    let params = ScenarioParameters {
        price_change_pct,
        portion_change_pct: portion_change,
        new_restaurant_count: new_restaurants,
        promo_uplift_pct: promo_uplift,
    };
    let rows = project_scenario(&base, &params)?;

    println!("Scenario projection:");
    for row in &rows {
        println!(
            "- {}: base {:.1} -> scenario {:.1} ({:+.2}%)",
            row.product, row.base_sales, row.scenario_sales, row.change_pct
        );
    }

    if let Some(path) = out {
        let headers: Vec<String> = ["Product", "Base sales", "Scenario sales", "Change %"]
            .map(String::from)
            .to_vec();
        let cells: Vec<Vec<Cell>> = rows
            .iter()
            .map(|row| {
                vec![
                    Cell::Text(row.product.clone()),
                    Cell::Float(row.base_sales),
                    Cell::Float(row.scenario_sales),
                    Cell::Float(row.change_pct),
                ]
            })
            .collect();
        export::save_table(&path, "Scenario", &headers, &cells)?;
        println!("Scenario report written to {}.", path.display());
    }
    Ok(())
}

fn report(
    session: &SessionState,
    kind: ReportKind,
    year: i32,
    out: Option<PathBuf>,
) -> anyhow::Result<()> {
    let report = build_report(session, kind, year)?;

    println!("{}", report.title);
    for (label, value) in &report.rows {
        println!("- {label}: {value:.0}");
    }

    if let Some(path) = out {
        export::save_report(&path, &report)?;
        println!("Report written to {}.", path.display());
    }
    Ok(())
}

fn seasonal_view(session: &SessionState, year: i32) -> anyhow::Result<()> {
    if !session.config().catalog.classifications.is_empty() {
        println!("Sales by classification, {year}:");
        for total in seasonal::classification_totals(session, year)? {
            println!("- {}: {:.0}", total.classification, total.total);
        }
        println!();
    }

    println!("Average weekly sales by season, {year}:");
    for share in seasonal::season_shares(session, year)? {
        println!(
            "- {}: {:.1} per week ({:.0}% of regular weeks)",
            share.season, share.weekly_average, share.pct_of_regular
        );
    }
    Ok(())
}

fn dynamics_view(
    session: &SessionState,
    restaurant: &str,
    product: &str,
    year: i32,
) -> anyhow::Result<()> {
    println!("Monthly sales of '{product}' at '{restaurant}':");
    for (month, value) in dynamics::monthly_series(session, restaurant, product)? {
        println!("- {month}: {value:.1}");
    }

    println!("\nProduct mix at '{restaurant}' in {year}:");
    for (name, value) in dynamics::product_share(session, restaurant, year)? {
        println!("- {name}: {value:.1}");
    }

    let city = dynamics::city_of(restaurant);
    println!("\n'{product}' across {city} restaurants in {year}:");
    for (name, value) in dynamics::city_comparison(session, city, product, year)? {
        println!("- {name}: {value:.1}");
    }
    Ok(())
}

async fn ask(
    session: &SessionState,
    filter: &ChatFilter<'_>,
    question: &str,
) -> anyhow::Result<()> {
    let records = chat::filtered_records(session, filter)?;
    if let Some(insights) = chat::insights(&records, filter.restaurant) {
        println!("Most sold product: {}", insights.top_product);
        println!(
            "Sales at {}: {:.0} ({:.2} per reported week)",
            filter.restaurant, insights.restaurant_total, insights.mean_weekly_orders
        );
    }

    let answer = chat::ask(&session.config().chat, session, filter, question).await?;
    println!("\nAnswer:\n{answer}");
    Ok(())
}
