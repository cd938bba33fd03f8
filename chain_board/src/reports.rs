//! Report tables: network summary, top products, restaurant rankings.

use clap::ValueEnum;

use crate::session::SessionState;

/// Which report to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportKind {
    /// Total sales per product across the whole chain
    Summary,
    /// The ten best-selling products
    Top,
    /// Restaurants ranked by their summed sales columns
    Rankings,
}

/// A two-column report table ready for printing or export.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub title: String,
    pub label_header: String,
    pub value_header: String,
    pub rows: Vec<(String, f64)>,
}

const TOP_PRODUCT_COUNT: usize = 10;

/// Build the chosen report over one year of catalog products.
///
/// A selection that matches nothing is an error with the reason, so the
/// caller stops instead of exporting a misleading empty table.
pub fn build_report(
    session: &SessionState,
    kind: ReportKind,
    year: i32,
) -> anyhow::Result<Report> {
    let records: Vec<_> = session
        .cleaned()
        .records
        .iter()
        .filter(|r| r.year == year && session.config().is_report_product(&r.product))
        .collect();
    if records.is_empty() {
        anyhow::bail!("no report products recorded for year {year}");
    }

    match kind {
        ReportKind::Summary | ReportKind::Top => {
            let mut totals: Vec<(String, f64)> = Vec::new();
            for record in &records {
                match totals.iter_mut().find(|(p, _)| p == &record.product) {
                    Some((_, sum)) => *sum += record.total,
                    None => totals.push((record.product.clone(), record.total)),
                }
            }
            totals.sort_by(|a, b| b.1.total_cmp(&a.1));

            let (title, rows) = if kind == ReportKind::Top {
                totals.truncate(TOP_PRODUCT_COUNT);
                (format!("Top {TOP_PRODUCT_COUNT} products, {year}"), totals)
            } else {
                (format!("Network summary, {year}"), totals)
            };

            Ok(Report {
                title,
                label_header: "Product".to_string(),
                value_header: "Total".to_string(),
                rows,
            })
        }
        ReportKind::Rankings => {
            let restaurants = session.cleaned().restaurants();
            if restaurants.is_empty() {
                anyhow::bail!("no restaurant columns in the loaded data, rankings are impossible");
            }

            let mut totals: Vec<(String, f64)> = restaurants
                .iter()
                .map(|name| {
                    let sum = records
                        .iter()
                        .filter_map(|r| r.by_restaurant.get(name))
                        .sum();
                    (name.clone(), sum)
                })
                .collect();
            totals.sort_by(|a, b| b.1.total_cmp(&a.1));

            Ok(Report {
                title: format!("Restaurant rankings, {year}"),
                label_header: "Restaurant".to_string(),
                value_header: "Sales".to_string(),
                rows: totals,
            })
        }
    }
}
