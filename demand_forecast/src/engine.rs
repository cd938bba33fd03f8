//! Forecast engine: model selection and dated weekly forecasts

use chrono::{Duration, NaiveDate};

use crate::error::{ForecastError, Result};
use crate::models::holt_winters::HoltWinters;
use crate::models::linear_trend::LinearTrend;
use crate::models::{ForecastModel, TrainedForecastModel};
use crate::series::WeeklySeries;

/// Minimum number of historical points required for any forecast.
/// Fewer points is an [`ForecastError::InsufficientHistory`] error,
/// never a silent empty result.
pub const MIN_OBSERVATIONS: usize = 4;

/// Season length for weekly data: one year of weeks.
pub const SEASONAL_PERIOD_WEEKS: usize = 52;

/// Minimum points for the seasonal model (two full seasons).
pub const MIN_SEASONAL_OBSERVATIONS: usize = 2 * SEASONAL_PERIOD_WEEKS;

const LEVEL_SMOOTHING: f64 = 0.4;
const TREND_SMOOTHING: f64 = 0.2;
const SEASONAL_SMOOTHING: f64 = 0.2;

/// A forecast with its future weekly dates attached.
///
/// Values stay in floating point; integer rounding happens only at the
/// display accessors so no rounding error compounds across the horizon.
#[derive(Debug, Clone, PartialEq)]
pub struct DatedForecast {
    model: String,
    points: Vec<(NaiveDate, f64)>,
}

impl DatedForecast {
    /// The model that produced this forecast.
    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn points(&self) -> &[(NaiveDate, f64)] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Sum of the point forecasts over the horizon.
    pub fn horizon_total(&self) -> f64 {
        self.points.iter().map(|(_, v)| v).sum()
    }

    /// Per-week display values, rounded to whole physical units.
    pub fn rounded(&self) -> Vec<(NaiveDate, i64)> {
        self.points
            .iter()
            .map(|(date, value)| (*date, value.round() as i64))
            .collect()
    }

    /// Horizon total rounded once, for pivot cells and summaries.
    pub fn rounded_total(&self) -> i64 {
        self.horizon_total().round() as i64
    }
}

/// Forecast the next `horizon` weekly periods of a series.
///
/// Uses additive Holt-Winters with a 52-week season when two full
/// seasons of history exist, otherwise Holt's linear-trend smoothing.
/// Both models are deterministic: the same series and horizon always
/// produce the same forecast. Point forecasts are clamped to zero from
/// below, since demand is a physical quantity.
pub fn forecast_demand(series: &WeeklySeries, horizon: usize) -> Result<DatedForecast> {
    if horizon == 0 {
        return Err(ForecastError::InvalidHorizon(horizon));
    }
    if series.len() < MIN_OBSERVATIONS {
        return Err(ForecastError::InsufficientHistory {
            needed: MIN_OBSERVATIONS,
            got: series.len(),
        });
    }

    let (model_name, values) = if series.len() >= MIN_SEASONAL_OBSERVATIONS {
        let model = HoltWinters::new(
            LEVEL_SMOOTHING,
            TREND_SMOOTHING,
            SEASONAL_SMOOTHING,
            SEASONAL_PERIOD_WEEKS,
        )?;
        let trained = model.fit(series)?;
        (
            trained.name().to_string(),
            trained.forecast(horizon)?.values().to_vec(),
        )
    } else {
        let model = LinearTrend::new(LEVEL_SMOOTHING, TREND_SMOOTHING)?;
        let trained = model.fit(series)?;
        (
            trained.name().to_string(),
            trained.forecast(horizon)?.values().to_vec(),
        )
    };

    let last_date = series
        .last_date()
        .ok_or_else(|| ForecastError::SeriesError("empty series".to_string()))?;

    let points = values
        .into_iter()
        .enumerate()
        .map(|(i, value)| {
            let date = last_date + Duration::weeks(i as i64 + 1);
            (date, value.max(0.0))
        })
        .collect();

    Ok(DatedForecast {
        model: model_name,
        points,
    })
}
