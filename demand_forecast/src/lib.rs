//! # Demand Forecast
//!
//! Weekly demand forecasting for restaurant-chain product sales.
//!
//! ## Features
//!
//! - Validated univariate weekly series ([`WeeklySeries`])
//! - Deterministic trend + seasonality models (additive Holt-Winters,
//!   Holt linear trend) behind a common fit/forecast trait pair
//! - An engine that selects the model from the amount of history and
//!   attaches future weekly dates to the predictions
//! - A batch orchestrator that fits every (product, restaurant) pair in
//!   parallel and assembles a complete, zero-filled pivot table
//! - Accuracy metrics for holdout evaluation
//!
//! ## Quick Start
//!
//! ```
//! use demand_forecast::engine::forecast_demand;
//! use demand_forecast::series::WeeklySeries;
//! use chrono::{Duration, NaiveDate};
//!
//! # fn main() -> demand_forecast::Result<()> {
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let points = (0..8)
//!     .map(|week| (start + Duration::weeks(week), 10.0))
//!     .collect();
//! let series = WeeklySeries::new(points)?;
//!
//! let forecast = forecast_demand(&series, 2)?;
//! assert_eq!(forecast.len(), 2);
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod models;
pub mod series;

// Re-export commonly used types
pub use crate::batch::{batch_forecast, ForecastPivot};
pub use crate::engine::{forecast_demand, DatedForecast, MIN_OBSERVATIONS};
pub use crate::error::{ForecastError, Result};
pub use crate::models::{ForecastModel, ForecastResult, TrainedForecastModel};
pub use crate::series::WeeklySeries;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
