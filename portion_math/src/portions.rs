//! Portion counts from weekly sales weight

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{MathError, Result};

/// One product's portion breakdown for a reporting period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortionRow {
    pub product: String,
    /// Total weight sold in the period, kg
    pub total_kg: f64,
    /// Weight of one portion, kg
    pub portion_kg: f64,
    /// Whole portions the weight covers (fractional remainder dropped)
    pub portions: u64,
}

/// Compute portion counts for every product with a cataloged portion
/// weight.
///
/// `totals` is (product, total kg) for the chosen period; products
/// missing from `portion_weights_kg` are skipped — the purchasing view
/// only covers cataloged products. A non-positive catalog weight is an
/// error, since dividing by it would be nonsense.
pub fn portion_breakdown(
    totals: &[(String, f64)],
    portion_weights_kg: &BTreeMap<String, f64>,
) -> Result<Vec<PortionRow>> {
    for (product, weight) in portion_weights_kg {
        if *weight <= 0.0 {
            return Err(MathError::InvalidInput(format!(
                "portion weight for '{product}' must be positive, got {weight}"
            )));
        }
    }

    let mut rows = Vec::new();
    for (product, total_kg) in totals {
        let Some(&portion_kg) = portion_weights_kg.get(product) else {
            continue;
        };
        if *total_kg < 0.0 {
            return Err(MathError::InvalidInput(format!(
                "total weight for '{product}' must be non-negative, got {total_kg}"
            )));
        }

        rows.push(PortionRow {
            product: product.clone(),
            total_kg: *total_kg,
            portion_kg,
            portions: (total_kg / portion_kg) as u64,
        });
    }

    Ok(rows)
}
