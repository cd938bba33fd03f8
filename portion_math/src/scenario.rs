//! What-if scenario projection over per-product base sales

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{MathError, Result};

/// Demand response to a price change: a 1% price increase moves demand
/// by -1%.
pub const PRICE_ELASTICITY: f64 = -1.0;

/// Each newly opened restaurant adds this share of a product's base
/// sales.
pub const NEW_RESTAURANT_UPLIFT: f64 = 0.05;

/// User-chosen scenario knobs. All percentages are whole-number style
/// (5.0 means 5%).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioParameters {
    /// Price change per product, -50..=100 %
    pub price_change_pct: BTreeMap<String, f64>,
    /// Portion size change, -50..=50 %
    pub portion_change_pct: f64,
    /// Planned new restaurant openings
    pub new_restaurant_count: u32,
    /// Demand uplift from a planned promotion, 0..=100 %
    pub promo_uplift_pct: f64,
}

impl ScenarioParameters {
    /// Check every knob against its allowed range.
    pub fn validate(&self) -> Result<()> {
        for (product, pct) in &self.price_change_pct {
            if !(-50.0..=100.0).contains(pct) {
                return Err(MathError::OutOfRange(format!(
                    "price change for '{product}' must be in -50..=100, got {pct}"
                )));
            }
        }
        if !(-50.0..=50.0).contains(&self.portion_change_pct) {
            return Err(MathError::OutOfRange(format!(
                "portion change must be in -50..=50, got {}",
                self.portion_change_pct
            )));
        }
        if !(0.0..=100.0).contains(&self.promo_uplift_pct) {
            return Err(MathError::OutOfRange(format!(
                "promo uplift must be in 0..=100, got {}",
                self.promo_uplift_pct
            )));
        }
        Ok(())
    }
}

/// One product's projected sales under a scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioRow {
    pub product: String,
    pub base_sales: f64,
    pub scenario_sales: f64,
    /// Relative change, percent, rounded to two decimals
    pub change_pct: f64,
}

/// Project scenario sales for every product.
///
/// `base` is (product, average weekly sales). Products without an entry
/// in `price_change_pct` get a 0% price change. The transform is
/// stateless: price elasticity, portion factor, new-restaurant uplift,
/// then the promo multiplier.
pub fn project_scenario(
    base: &[(String, f64)],
    params: &ScenarioParameters,
) -> Result<Vec<ScenarioRow>> {
    params.validate()?;

    let mut rows = Vec::with_capacity(base.len());
    for (product, base_sales) in base {
        if *base_sales < 0.0 {
            return Err(MathError::InvalidInput(format!(
                "base sales for '{product}' must be non-negative, got {base_sales}"
            )));
        }

        let price_pct = params.price_change_pct.get(product).copied().unwrap_or(0.0);
        let price_factor = 1.0 + (price_pct / 100.0) * PRICE_ELASTICITY;
        let portion_factor = 1.0 + params.portion_change_pct / 100.0;
        let promo_factor = 1.0 + params.promo_uplift_pct / 100.0;

        let mut scenario_sales = base_sales * price_factor * portion_factor;
        scenario_sales +=
            params.new_restaurant_count as f64 * (base_sales * NEW_RESTAURANT_UPLIFT);
        scenario_sales *= promo_factor;

        let change_pct = if *base_sales > 0.0 {
            ((scenario_sales - base_sales) / base_sales * 100.0 * 100.0).round() / 100.0
        } else {
            0.0
        };

        rows.push(ScenarioRow {
            product: product.clone(),
            base_sales: *base_sales,
            scenario_sales,
            change_pct,
        });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(entries: &[(&str, f64)]) -> Vec<(String, f64)> {
        entries
            .iter()
            .map(|(name, v)| (name.to_string(), *v))
            .collect()
    }

    #[test]
    fn neutral_parameters_change_nothing() {
        let rows =
            project_scenario(&base(&[("Beef", 100.0)]), &ScenarioParameters::default())
                .unwrap();
        assert_eq!(rows[0].scenario_sales, 100.0);
        assert_eq!(rows[0].change_pct, 0.0);
    }

    #[test]
    fn price_increase_suppresses_demand() {
        let params = ScenarioParameters {
            price_change_pct: BTreeMap::from([("Beef".to_string(), 10.0)]),
            ..Default::default()
        };
        let rows = project_scenario(&base(&[("Beef", 100.0)]), &params).unwrap();

        // Elasticity -1: +10% price -> -10% demand.
        assert!((rows[0].scenario_sales - 90.0).abs() < 1e-9);
        assert_eq!(rows[0].change_pct, -10.0);
    }

    #[test]
    fn factors_compose_in_order() {
        let params = ScenarioParameters {
            price_change_pct: BTreeMap::new(),
            portion_change_pct: 10.0,
            new_restaurant_count: 2,
            promo_uplift_pct: 20.0,
        };
        let rows = project_scenario(&base(&[("Beef", 100.0)]), &params).unwrap();

        // (100 * 1.1 + 2 * 100 * 0.05) * 1.2 = 144
        assert!((rows[0].scenario_sales - 144.0).abs() < 1e-9);
        assert_eq!(rows[0].change_pct, 44.0);
    }

    #[test]
    fn out_of_range_parameters_are_rejected() {
        let too_cheap = ScenarioParameters {
            price_change_pct: BTreeMap::from([("Beef".to_string(), -60.0)]),
            ..Default::default()
        };
        assert!(project_scenario(&base(&[("Beef", 1.0)]), &too_cheap).is_err());

        let oversized_portion = ScenarioParameters {
            portion_change_pct: 80.0,
            ..Default::default()
        };
        assert!(project_scenario(&base(&[("Beef", 1.0)]), &oversized_portion).is_err());

        let negative_promo = ScenarioParameters {
            promo_uplift_pct: -5.0,
            ..Default::default()
        };
        assert!(project_scenario(&base(&[("Beef", 1.0)]), &negative_promo).is_err());
    }

    #[test]
    fn unlisted_products_get_no_price_change() {
        let params = ScenarioParameters {
            price_change_pct: BTreeMap::from([("Chili".to_string(), 50.0)]),
            ..Default::default()
        };
        let rows = project_scenario(&base(&[("Beef", 80.0)]), &params).unwrap();
        assert_eq!(rows[0].scenario_sales, 80.0);
    }
}
