//! Per-restaurant sales dynamics: monthly series, product shares and
//! same-city comparisons.

use chrono::NaiveDate;

use crate::session::SessionState;

/// City of a restaurant column: the first whitespace-separated word of
/// its name ("Riverside Mall" -> "Riverside").
pub fn city_of(restaurant: &str) -> &str {
    restaurant.split_whitespace().next().unwrap_or(restaurant)
}

/// Distinct cities across the recognized restaurant columns, sorted.
pub fn cities(session: &SessionState) -> Vec<String> {
    let mut cities: Vec<String> = session
        .cleaned()
        .restaurants()
        .iter()
        .map(|r| city_of(r).to_string())
        .collect();
    cities.sort();
    cities.dedup();
    cities
}

/// Restaurant columns located in one city, sorted.
pub fn city_restaurants(session: &SessionState, city: &str) -> Vec<String> {
    session
        .cleaned()
        .restaurants()
        .iter()
        .filter(|r| city_of(r) == city)
        .cloned()
        .collect()
}

/// Monthly sales of one product at one restaurant, dated to the first
/// of each month, ascending.
pub fn monthly_series(
    session: &SessionState,
    restaurant: &str,
    product: &str,
) -> anyhow::Result<Vec<(NaiveDate, f64)>> {
    ensure_restaurant(session, restaurant)?;

    let mut by_month: Vec<((i32, u32), f64)> = Vec::new();
    for record in &session.cleaned().records {
        if record.product != product {
            continue;
        }
        let Some(value) = record.by_restaurant.get(restaurant) else {
            continue;
        };
        let key = (record.year, record.month);
        match by_month.iter_mut().find(|(k, _)| *k == key) {
            Some((_, sum)) => *sum += value,
            None => by_month.push((key, *value)),
        }
    }

    if by_month.is_empty() {
        anyhow::bail!("no sales of '{product}' recorded at '{restaurant}'");
    }

    by_month.sort_by_key(|(key, _)| *key);
    Ok(by_month
        .into_iter()
        .map(|((year, month), sum)| {
            // Month comes from the normalizer's 1..=12 range, so the
            // first of the month always exists.
            let date = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
            (date, sum)
        })
        .collect())
}

/// Share of each analysis product in one restaurant's sales for a year,
/// as (product, sales) sorted by sales descending.
pub fn product_share(
    session: &SessionState,
    restaurant: &str,
    year: i32,
) -> anyhow::Result<Vec<(String, f64)>> {
    ensure_restaurant(session, restaurant)?;

    let mut shares: Vec<(String, f64)> = Vec::new();
    for record in &session.cleaned().records {
        if record.year != year || !session.config().is_analysis_product(&record.product) {
            continue;
        }
        let Some(value) = record.by_restaurant.get(restaurant) else {
            continue;
        };
        match shares.iter_mut().find(|(p, _)| p == &record.product) {
            Some((_, sum)) => *sum += value,
            None => shares.push((record.product.clone(), *value)),
        }
    }

    if shares.is_empty() {
        anyhow::bail!("no analysis-product sales at '{restaurant}' in {year}");
    }
    shares.sort_by(|a, b| b.1.total_cmp(&a.1));
    Ok(shares)
}

/// One product's yearly sales across every restaurant of a city.
pub fn city_comparison(
    session: &SessionState,
    city: &str,
    product: &str,
    year: i32,
) -> anyhow::Result<Vec<(String, f64)>> {
    let restaurants = city_restaurants(session, city);
    if restaurants.is_empty() {
        anyhow::bail!("no restaurants found for city '{city}'");
    }

    let totals: Vec<(String, f64)> = restaurants
        .into_iter()
        .map(|restaurant| {
            let sum = session
                .cleaned()
                .records
                .iter()
                .filter(|r| r.year == year && r.product == product)
                .filter_map(|r| r.by_restaurant.get(&restaurant))
                .sum();
            (restaurant, sum)
        })
        .collect();
    Ok(totals)
}

fn ensure_restaurant(session: &SessionState, restaurant: &str) -> anyhow::Result<()> {
    if !session
        .cleaned()
        .restaurants()
        .iter()
        .any(|r| r == restaurant)
    {
        anyhow::bail!("'{restaurant}' is not a restaurant column in this data");
    }
    Ok(())
}
