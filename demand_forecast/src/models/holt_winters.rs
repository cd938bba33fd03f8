//! Additive Holt-Winters trend + seasonality decomposition

use crate::error::{ForecastError, Result};
use crate::models::{ForecastModel, ForecastResult, TrainedForecastModel};
use crate::series::WeeklySeries;

/// Additive Holt-Winters: level, trend and a repeating seasonal index.
///
/// Fitting needs at least two full seasons of history so the initial
/// seasonal indices and trend can be estimated from whole-season means.
#[derive(Debug, Clone)]
pub struct HoltWinters {
    /// Name of the model
    name: String,
    /// Level smoothing parameter
    alpha: f64,
    /// Trend smoothing parameter
    beta: f64,
    /// Seasonal smoothing parameter
    gamma: f64,
    /// Season length in periods
    period: usize,
}

/// Trained additive Holt-Winters model
#[derive(Debug, Clone)]
pub struct TrainedHoltWinters {
    /// Name of the model
    name: String,
    /// Final smoothed level
    level: f64,
    /// Final smoothed trend per period
    trend: f64,
    /// Seasonal indices, one per period of the season
    seasonals: Vec<f64>,
    /// Number of observations the model was fitted on
    fitted_len: usize,
}

impl HoltWinters {
    /// Create a new additive Holt-Winters model
    pub fn new(alpha: f64, beta: f64, gamma: f64, period: usize) -> Result<Self> {
        for (name, value) in [("Alpha", alpha), ("Beta", beta), ("Gamma", gamma)] {
            if value <= 0.0 || value >= 1.0 {
                return Err(ForecastError::InvalidParameter(format!(
                    "{name} must be between 0 and 1"
                )));
            }
        }
        if period < 2 {
            return Err(ForecastError::InvalidParameter(
                "Season length must be at least 2 periods".to_string(),
            ));
        }

        Ok(Self {
            name: format!("Holt-Winters (period={period})"),
            alpha,
            beta,
            gamma,
            period,
        })
    }
}

impl ForecastModel for HoltWinters {
    type Trained = TrainedHoltWinters;

    fn fit(&self, series: &WeeklySeries) -> Result<Self::Trained> {
        let values = series.values();
        let m = self.period;
        if values.len() < 2 * m {
            return Err(ForecastError::InsufficientHistory {
                needed: 2 * m,
                got: values.len(),
            });
        }

        // Initial level and trend from the first two season means,
        // initial seasonal indices from deviations within season one.
        let season_one = mean(&values[..m]);
        let season_two = mean(&values[m..2 * m]);
        let mut level = season_one;
        let mut trend = (season_two - season_one) / m as f64;
        let mut seasonals: Vec<f64> = values[..m].iter().map(|v| v - season_one).collect();

        for (t, &value) in values.iter().enumerate().skip(m) {
            let idx = t % m;
            let last_level = level;
            level = self.alpha * (value - seasonals[idx])
                + (1.0 - self.alpha) * (level + trend);
            trend = self.beta * (level - last_level) + (1.0 - self.beta) * trend;
            seasonals[idx] =
                self.gamma * (value - level) + (1.0 - self.gamma) * seasonals[idx];
        }

        Ok(TrainedHoltWinters {
            name: self.name.clone(),
            level,
            trend,
            seasonals,
            fitted_len: values.len(),
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedForecastModel for TrainedHoltWinters {
    fn forecast(&self, horizon: usize) -> Result<ForecastResult> {
        let m = self.seasonals.len();
        let values = (1..=horizon)
            .map(|step| {
                let seasonal = self.seasonals[(self.fitted_len + step - 1) % m];
                self.level + step as f64 * self.trend + seasonal
            })
            .collect();

        ForecastResult::new(values, horizon)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}
