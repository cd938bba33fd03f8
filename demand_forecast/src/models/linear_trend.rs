//! Holt's linear-trend smoothing for short weekly series

use crate::error::{ForecastError, Result};
use crate::models::{ForecastModel, ForecastResult, TrainedForecastModel};
use crate::series::WeeklySeries;

/// Double exponential smoothing: a level plus an additive trend.
///
/// This is the engine's fallback model for series shorter than two full
/// seasons, where a seasonal decomposition has nothing to estimate from.
#[derive(Debug, Clone)]
pub struct LinearTrend {
    /// Name of the model
    name: String,
    /// Level smoothing parameter
    alpha: f64,
    /// Trend smoothing parameter
    beta: f64,
}

/// Trained linear-trend model
#[derive(Debug, Clone)]
pub struct TrainedLinearTrend {
    /// Name of the model
    name: String,
    /// Final smoothed level
    level: f64,
    /// Final smoothed trend per week
    trend: f64,
}

impl LinearTrend {
    /// Create a new linear-trend model
    pub fn new(alpha: f64, beta: f64) -> Result<Self> {
        if alpha <= 0.0 || alpha >= 1.0 {
            return Err(ForecastError::InvalidParameter(
                "Alpha must be between 0 and 1".to_string(),
            ));
        }
        if beta <= 0.0 || beta >= 1.0 {
            return Err(ForecastError::InvalidParameter(
                "Beta must be between 0 and 1".to_string(),
            ));
        }

        Ok(Self {
            name: format!("Linear Trend (alpha={alpha}, beta={beta})"),
            alpha,
            beta,
        })
    }
}

impl ForecastModel for LinearTrend {
    type Trained = TrainedLinearTrend;

    fn fit(&self, series: &WeeklySeries) -> Result<Self::Trained> {
        let values = series.values();
        if values.len() < 2 {
            return Err(ForecastError::InsufficientHistory {
                needed: 2,
                got: values.len(),
            });
        }

        // Initialize from the first two observations
        let mut level = values[0];
        let mut trend = values[1] - values[0];

        for &value in &values[1..] {
            let last_level = level;
            level = self.alpha * value + (1.0 - self.alpha) * (level + trend);
            trend = self.beta * (level - last_level) + (1.0 - self.beta) * trend;
        }

        Ok(TrainedLinearTrend {
            name: self.name.clone(),
            level,
            trend,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedForecastModel for TrainedLinearTrend {
    fn forecast(&self, horizon: usize) -> Result<ForecastResult> {
        let values = (1..=horizon)
            .map(|step| self.level + step as f64 * self.trend)
            .collect();

        ForecastResult::new(values, horizon)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
