//! Forecasting models for weekly demand series

use std::fmt::Debug;

use crate::error::{ForecastError, Result};
use crate::series::WeeklySeries;

/// Forecast result containing the predicted values for one horizon
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastResult {
    values: Vec<f64>,
    horizon: usize,
}

impl ForecastResult {
    /// Create a new forecast result
    pub fn new(values: Vec<f64>, horizon: usize) -> Result<Self> {
        if values.len() != horizon {
            return Err(ForecastError::ValidationError(format!(
                "Values length ({}) doesn't match horizon ({})",
                values.len(),
                horizon
            )));
        }

        Ok(Self { values, horizon })
    }

    /// Get the forecasted values
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Get the number of periods forecasted
    pub fn horizon(&self) -> usize {
        self.horizon
    }
}

/// Trained forecast model
pub trait TrainedForecastModel: Debug {
    /// Generate point forecasts for the next `horizon` weekly periods
    fn forecast(&self, horizon: usize) -> Result<ForecastResult>;

    /// Name of the model
    fn name(&self) -> &str;
}

/// Forecast model that can be fitted to a weekly series
pub trait ForecastModel: Debug + Clone {
    /// The type of trained model produced
    type Trained: TrainedForecastModel;

    /// Fit the model to a weekly series
    fn fit(&self, series: &WeeklySeries) -> Result<Self::Trained>;

    /// Get the name of the model
    fn name(&self) -> &str;
}

pub mod holt_winters;
pub mod linear_trend;
