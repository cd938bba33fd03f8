//! Seasonal trend analysis over week-number season sets.

use std::fmt;

use crate::session::SessionState;

/// Winter season: the cold-weather weeks at both ends of the year.
pub const WINTER_WEEKS: [u32; 15] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 47, 48, 49, 50, 51, 52];
/// Summer season.
pub const SUMMER_WEEKS: [u32; 12] = [21, 22, 23, 24, 25, 26, 27, 28, 29, 30, 31, 32];
/// Weeks containing public holidays and promo peaks.
pub const HOLIDAY_WEEKS: [u32; 12] = [1, 2, 7, 8, 10, 19, 20, 23, 25, 47, 51, 52];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Season {
    Winter,
    Summer,
    Holiday,
    Regular,
}

impl Season {
    /// Classify a week number. Winter takes precedence over the holiday
    /// set where they overlap (new-year weeks).
    pub fn of_week(week: u32) -> Self {
        if WINTER_WEEKS.contains(&week) {
            Season::Winter
        } else if SUMMER_WEEKS.contains(&week) {
            Season::Summer
        } else if HOLIDAY_WEEKS.contains(&week) {
            Season::Holiday
        } else {
            Season::Regular
        }
    }

    /// How many of the 52 standard week numbers classify to this season
    /// under the same precedence.
    pub fn week_count(&self) -> usize {
        (1..=52).filter(|week| Season::of_week(*week) == *self).count()
    }

    pub const ALL: [Season; 4] = [
        Season::Winter,
        Season::Summer,
        Season::Holiday,
        Season::Regular,
    ];
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Season::Winter => "Winter",
            Season::Summer => "Summer",
            Season::Holiday => "Holidays",
            Season::Regular => "Regular weeks",
        };
        f.write_str(name)
    }
}

/// Yearly sales total of one classification group.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationTotal {
    pub classification: String,
    pub total: f64,
}

/// Average weekly sales of one season, also as a share of the regular
/// season.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonShare {
    pub season: Season,
    pub weekly_average: f64,
    pub pct_of_regular: f64,
}

/// Sum a year's sales per configured classification group.
pub fn classification_totals(
    session: &SessionState,
    year: i32,
) -> anyhow::Result<Vec<ClassificationTotal>> {
    let groups = &session.config().catalog.classifications;
    if groups.is_empty() {
        anyhow::bail!("no product classifications configured");
    }

    let mut totals = Vec::with_capacity(groups.len());
    for (classification, products) in groups {
        let total = session
            .cleaned()
            .records
            .iter()
            .filter(|r| r.year == year && products.contains(&r.product))
            .map(|r| r.total)
            .sum();
        totals.push(ClassificationTotal {
            classification: classification.clone(),
            total,
        });
    }

    if totals.iter().all(|t| t.total == 0.0) {
        anyhow::bail!("no classified products recorded for year {year}");
    }
    Ok(totals)
}

/// Average weekly sales per season for one year, as absolute values and
/// as a percentage of the regular-season average.
pub fn season_shares(session: &SessionState, year: i32) -> anyhow::Result<Vec<SeasonShare>> {
    let mut season_totals = [0.0f64; 4];
    let mut seen = false;
    for record in &session.cleaned().records {
        if record.year != year || !session.config().is_analysis_product(&record.product) {
            continue;
        }
        seen = true;
        let season = Season::of_week(record.week);
        let idx = Season::ALL.iter().position(|s| *s == season).unwrap();
        season_totals[idx] += record.total;
    }
    if !seen {
        anyhow::bail!("no analysis products recorded for year {year}");
    }

    let averages: Vec<f64> = Season::ALL
        .iter()
        .zip(season_totals)
        .map(|(season, total)| total / season.week_count() as f64)
        .collect();

    let regular_idx = Season::ALL
        .iter()
        .position(|s| *s == Season::Regular)
        .unwrap();
    let regular_average = averages[regular_idx];
    if regular_average == 0.0 {
        anyhow::bail!("no regular-week sales in year {year}, season shares are undefined");
    }

    Ok(Season::ALL
        .iter()
        .zip(averages)
        .map(|(season, weekly_average)| SeasonShare {
            season: *season,
            weekly_average,
            pct_of_regular: weekly_average / regular_average * 100.0,
        })
        .collect())
}
