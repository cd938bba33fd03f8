//! ISO 8601 week-date resolution.

use chrono::{NaiveDate, Weekday};

use crate::error::{DataError, Result};

/// Resolve `(year, isoWeek)` to the Monday of that ISO 8601 week.
///
/// Week 1 is the week containing the year's first Thursday. An invalid
/// pair (week 0, week 53 in a 52-week year, week > 53) is an
/// [`DataError::InvalidIsoWeek`] — downstream grouping must never see a
/// null date.
pub fn iso_week_monday(year: i32, week: u32) -> Result<NaiveDate> {
    NaiveDate::from_isoywd_opt(year, week, Weekday::Mon)
        .ok_or(DataError::InvalidIsoWeek { year, week })
}

/// Number of ISO weeks in a year (52 or 53).
pub fn iso_weeks_in_year(year: i32) -> u32 {
    if NaiveDate::from_isoywd_opt(year, 53, Weekday::Mon).is_some() {
        53
    } else {
        52
    }
}

#[cfg(test)]
mod tests {
    use chrono::Datelike;

    use super::*;

    #[test]
    fn week_one_of_2024_is_new_years_day() {
        let date = iso_week_monday(2024, 1).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[test]
    fn resolved_dates_are_always_mondays() {
        for year in [2015, 2020, 2023, 2026] {
            for week in 1..=iso_weeks_in_year(year) {
                let date = iso_week_monday(year, week).unwrap();
                assert_eq!(date.weekday(), Weekday::Mon, "{year}-W{week}");
            }
        }
    }

    #[test]
    fn week_53_exists_only_in_long_years() {
        // 2020 has 53 ISO weeks, 2023 has 52.
        assert!(iso_week_monday(2020, 53).is_ok());
        assert!(matches!(
            iso_week_monday(2023, 53),
            Err(DataError::InvalidIsoWeek { year: 2023, week: 53 })
        ));
        assert!(iso_week_monday(2023, 0).is_err());
    }
}
