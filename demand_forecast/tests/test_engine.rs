use chrono::{Duration, NaiveDate};
use demand_forecast::engine::{forecast_demand, MIN_OBSERVATIONS};
use demand_forecast::series::WeeklySeries;
use demand_forecast::ForecastError;
use pretty_assertions::assert_eq;
use rstest::rstest;

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
fn test_flat_series_forecasts_near_the_level() {
    // Eight weeks of 10 units, horizon 2: exactly two future points,
    // each in a tight band around 10.
    let series = weekly_series(&[10.0; 8]);
    let forecast = forecast_demand(&series, 2).unwrap();

    assert_eq!(forecast.len(), 2);
    for (_, value) in forecast.points() {
        assert!((8.0..=12.0).contains(value), "point {value} outside band");
    }
    assert_eq!(forecast.rounded_total(), 20);
}

#[test]
fn test_forecast_dates_are_the_next_weekly_periods() {
    let series = weekly_series(&[10.0; 8]);
    let forecast = forecast_demand(&series, 2).unwrap();

    let last = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Duration::weeks(7);
    let dates: Vec<NaiveDate> = forecast.points().iter().map(|(d, _)| *d).collect();
    assert_eq!(dates, vec![last + Duration::weeks(1), last + Duration::weeks(2)]);
}

#[test]
fn test_forecast_is_deterministic() {
    let values: Vec<f64> = (0..20).map(|t| 40.0 + (t as f64).sin() * 6.0).collect();
    let series = weekly_series(&values);

    let first = forecast_demand(&series, 4).unwrap();
    let second = forecast_demand(&series, 4).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_downtrend_forecasts_clamp_at_zero() {
    let series = weekly_series(&[100.0, 70.0, 40.0, 10.0]);
    let forecast = forecast_demand(&series, 3).unwrap();

    for (_, value) in forecast.points() {
        assert!(*value >= 0.0, "negative demand {value}");
    }
    // The trend is roughly -30/week from 10, so later steps bottom out.
    assert_eq!(forecast.points().last().unwrap().1, 0.0);
}

#[test]
fn test_zero_horizon_is_rejected() {
    let series = weekly_series(&[10.0; 8]);
    assert!(matches!(
        forecast_demand(&series, 0),
        Err(ForecastError::InvalidHorizon(0))
    ));
}

#[rstest]
#[case(1)]
#[case(3)]
fn test_too_little_history_is_a_fit_error(#[case] len: usize) {
    let series = weekly_series(&vec![10.0; len]);
    let result = forecast_demand(&series, 2);
    assert!(matches!(
        result,
        Err(ForecastError::InsufficientHistory { needed, .. }) if needed == MIN_OBSERVATIONS
    ));
}

#[test]
fn test_rounding_happens_only_at_display() {
    let series = weekly_series(&[10.4; 8]);
    let forecast = forecast_demand(&series, 2).unwrap();

    // Interior values stay fractional; rounding is an accessor concern.
    assert!((forecast.horizon_total() - 20.8).abs() < 1e-9);
    let rounded = forecast.rounded();
    assert_eq!(rounded.len(), 2);
    assert!(rounded.iter().all(|(_, v)| *v == 10));
    assert_eq!(forecast.rounded_total(), 21);
}
