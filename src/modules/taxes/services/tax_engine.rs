// Tax computation over a taxable base
//
// Unlike discounts, tax rates never cascade: every rate is computed
// independently against the same taxable base and the contributions are
// summed. Each contribution is floor-clamped to zero so a misconfigured
// negative rate can never reduce the total.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::modules::taxes::models::{ResolvedTaxRate, TaxApplied, TaxRateType};

/// Outcome of computing tax for a taxable base
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxResult {
    pub total_tax: Decimal,
    /// One record per rate, in the order supplied
    pub taxes_applied: Vec<TaxApplied>,
}

/// Computes total tax from already-resolved rates
pub struct TaxEngine;

impl TaxEngine {
    /// Total tax for `taxable_base` under `rates`
    ///
    /// Percentage rates contribute `base * value / 100`; fixed rates
    /// contribute their value verbatim, independent of the base. The base
    /// itself is floored at zero.
    pub fn compute_tax(taxable_base: Decimal, rates: &[ResolvedTaxRate]) -> TaxResult {
        let taxable_base = taxable_base.max(Decimal::ZERO);

        let mut total_tax = Decimal::ZERO;
        let mut taxes_applied = Vec::with_capacity(rates.len());

        for rate in rates {
            let contribution = match rate.rate_type {
                TaxRateType::Percentage => {
                    taxable_base * rate.percentage_value.unwrap_or(Decimal::ZERO)
                        / Decimal::ONE_HUNDRED
                }
                TaxRateType::Fixed => rate.fixed_value.unwrap_or(Decimal::ZERO),
            };

            // Never let a negative contribution reduce total tax
            let contribution = contribution.max(Decimal::ZERO);

            debug!(
                "tax rate {} on base {}: contribution {}",
                rate.id, taxable_base, contribution
            );

            taxes_applied.push(TaxApplied {
                tax_rate_id: rate.id.clone(),
                taxable_amount: taxable_base,
                tax_amount: contribution,
            });
            total_tax += contribution;
        }

        TaxResult {
            total_tax,
            taxes_applied,
        }
    }
}
