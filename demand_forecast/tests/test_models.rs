use chrono::{Duration, NaiveDate};
use demand_forecast::models::holt_winters::HoltWinters;
use demand_forecast::models::linear_trend::LinearTrend;
use demand_forecast::models::{ForecastModel, TrainedForecastModel};
use demand_forecast::series::WeeklySeries;
use demand_forecast::ForecastError;
use pretty_assertions::assert_eq;

fn weekly_series(values: &[f64]) -> WeeklySeries {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let points = values
        .iter()
        .enumerate()
        .map(|(week, &value)| (start + Duration::weeks(week as i64), value))
        .collect();
    WeeklySeries::new(points).unwrap()
}

#[test]
fn test_linear_trend_follows_an_exact_line() {
    // y = 5 + 2t: the smoothed level locks onto the line, so the
    // forecast continues it exactly.
    let values: Vec<f64> = (0..6).map(|t| 5.0 + 2.0 * t as f64).collect();
    let series = weekly_series(&values);

    let trained = LinearTrend::new(0.4, 0.2).unwrap().fit(&series).unwrap();
    let forecast = trained.forecast(3).unwrap();

    assert_eq!(forecast.horizon(), 3);
    for (step, value) in forecast.values().iter().enumerate() {
        let expected = 5.0 + 2.0 * (5 + step + 1) as f64;
        assert!(
            (value - expected).abs() < 1e-9,
            "step {step}: {value} vs {expected}"
        );
    }
}

#[test]
fn test_linear_trend_is_flat_on_flat_data() {
    let series = weekly_series(&[10.0; 8]);
    let trained = LinearTrend::new(0.4, 0.2).unwrap().fit(&series).unwrap();
    let forecast = trained.forecast(2).unwrap();

    for value in forecast.values() {
        assert!((value - 10.0).abs() < 1e-9);
    }
}

#[test]
fn test_holt_winters_continues_a_stable_seasonal_pattern() {
    // Period 4 with additive pattern [0, 5, -5, 0] around a base of 100:
    // the initial decomposition is already exact and stays fixed.
    let pattern = [0.0, 5.0, -5.0, 0.0];
    let values: Vec<f64> = (0..12).map(|t| 100.0 + pattern[t % 4]).collect();
    let series = weekly_series(&values);

    let trained = HoltWinters::new(0.4, 0.2, 0.2, 4)
        .unwrap()
        .fit(&series)
        .unwrap();
    let forecast = trained.forecast(4).unwrap();

    let expected = [100.0, 105.0, 95.0, 100.0];
    for (value, want) in forecast.values().iter().zip(expected) {
        assert!((value - want).abs() < 1e-9, "{value} vs {want}");
    }
}

#[test]
fn test_parameter_validation() {
    assert!(LinearTrend::new(0.0, 0.5).is_err());
    assert!(LinearTrend::new(0.5, 1.0).is_err());
    assert!(HoltWinters::new(1.5, 0.2, 0.2, 4).is_err());
    assert!(HoltWinters::new(0.4, 0.2, 0.2, 1).is_err());
}

#[test]
fn test_insufficient_history_is_an_error() {
    let short = weekly_series(&[10.0]);
    let result = LinearTrend::new(0.4, 0.2).unwrap().fit(&short);
    assert!(matches!(
        result,
        Err(ForecastError::InsufficientHistory { needed: 2, got: 1 })
    ));

    let one_season = weekly_series(&[10.0; 5]);
    let result = HoltWinters::new(0.4, 0.2, 0.2, 4).unwrap().fit(&one_season);
    assert!(matches!(
        result,
        Err(ForecastError::InsufficientHistory { needed: 8, got: 5 })
    ));
}

#[test]
fn test_fitting_is_deterministic() {
    let values: Vec<f64> = (0..16).map(|t| 50.0 + (t % 5) as f64 * 3.0).collect();
    let series = weekly_series(&values);
    let model = LinearTrend::new(0.4, 0.2).unwrap();

    let first = model.fit(&series).unwrap().forecast(4).unwrap();
    let second = model.fit(&series).unwrap().forecast(4).unwrap();
    assert_eq!(first, second);
}
