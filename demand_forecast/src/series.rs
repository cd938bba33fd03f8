//! Validated weekly series for forecasting

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ForecastError, Result};

/// An ordered univariate weekly series.
///
/// Construction sorts the points by date and enforces the forecasting
/// preconditions: every value finite, every date unique. Gaps between
/// weeks are tolerated; duplicates are not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklySeries {
    points: Vec<(NaiveDate, f64)>,
}

impl WeeklySeries {
    /// Build a series from (date, value) points.
    pub fn new(mut points: Vec<(NaiveDate, f64)>) -> Result<Self> {
        for (date, value) in &points {
            if !value.is_finite() {
                return Err(ForecastError::SeriesError(format!(
                    "non-finite value at {date}"
                )));
            }
        }

        points.sort_by_key(|(date, _)| *date);
        if let Some(window) = points.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(ForecastError::SeriesError(format!(
                "duplicate date {} in series",
                window[0].0
            )));
        }

        Ok(Self { points })
    }

    pub fn points(&self) -> &[(NaiveDate, f64)] {
        &self.points
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|(_, v)| *v).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|(date, _)| *date)
    }

    /// Mean of the observed values.
    pub fn mean(&self) -> Result<f64> {
        if self.points.is_empty() {
            return Err(ForecastError::SeriesError("empty series".to_string()));
        }
        let sum: f64 = self.points.iter().map(|(_, v)| v).sum();
        Ok(sum / self.points.len() as f64)
    }

    /// Population standard deviation of the observed values.
    pub fn std_dev(&self) -> Result<f64> {
        let mean = self.mean()?;
        let variance: f64 = self
            .points
            .iter()
            .map(|(_, v)| (v - mean).powi(2))
            .sum::<f64>()
            / self.points.len() as f64;
        Ok(variance.sqrt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    fn sorts_points_by_date() {
        let series =
            WeeklySeries::new(vec![(date(15), 3.0), (date(1), 1.0), (date(8), 2.0)]).unwrap();
        assert_eq!(series.values(), vec![1.0, 2.0, 3.0]);
        assert_eq!(series.last_date(), Some(date(15)));
    }

    #[test]
    fn rejects_duplicates_and_non_finite_values() {
        let dup = WeeklySeries::new(vec![(date(1), 1.0), (date(1), 2.0)]);
        assert!(dup.is_err());

        let nan = WeeklySeries::new(vec![(date(1), f64::NAN)]);
        assert!(nan.is_err());
    }

    #[test]
    fn summary_statistics() {
        let series = WeeklySeries::new(vec![(date(1), 10.0), (date(8), 20.0)]).unwrap();
        assert_eq!(series.mean().unwrap(), 15.0);
        assert_eq!(series.std_dev().unwrap(), 5.0);
    }
}
