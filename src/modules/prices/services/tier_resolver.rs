// Tier resolution: billing model dispatch and per-tier cost breakup
//
// Selects the applicable tier(s) for a quantity and computes the effective
// unit cost and final cost at full precision. No rounding happens here;
// the totals assembler owns the rounding boundary.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::modules::prices::models::{BillingModel, Price, TierMode, TransformRound};

/// Cost breakup produced by resolving a price against a quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakup {
    /// Blended per-unit cost: final_cost / quantity for quantity > 0
    pub effective_unit_cost: Decimal,
    /// Index of the tier the quantity resolved to; -1 when no tier applies
    /// (flat fee, package, zero quantity). For graduated mode this is the
    /// highest tier reached.
    pub selected_tier_index: i32,
    /// Unit amount of the selected tier (package: per-unit price within a
    /// package, i.e. unit_amount / divide_by)
    pub tier_unit_amount: Decimal,
    /// Total cost for the quantity, pre-discount, full precision
    pub final_cost: Decimal,
}

impl CostBreakup {
    fn zero() -> Self {
        Self {
            effective_unit_cost: Decimal::ZERO,
            selected_tier_index: -1,
            tier_unit_amount: Decimal::ZERO,
            final_cost: Decimal::ZERO,
        }
    }
}

/// Resolves a price's billing model against a quantity
///
/// Pure function over the immutable price snapshot: identical inputs always
/// yield identical decimal results, which is what makes finalized invoices
/// reproducible. Price invariants (non-empty tiers for Tiered, positive
/// divisor for Package) are guaranteed by the `Price` constructors and are
/// not re-checked here.
pub struct PriceTierResolver;

impl PriceTierResolver {
    /// Resolve the cost breakup for `quantity` units of `price`
    ///
    /// A flat fee charges its unit amount regardless of quantity, including
    /// zero. Every other model yields a zero cost for zero quantity.
    pub fn resolve(price: &Price, quantity: Decimal) -> CostBreakup {
        match price.billing_model {
            BillingModel::FlatFee => Self::resolve_flat_fee(price),
            BillingModel::Package => Self::resolve_package(price, quantity),
            BillingModel::Tiered => match price.tier_mode.unwrap_or(TierMode::Volume) {
                TierMode::Volume => Self::resolve_volume(price, quantity),
                TierMode::Graduated => Self::resolve_graduated(price, quantity),
            },
        }
    }

    fn resolve_flat_fee(price: &Price) -> CostBreakup {
        CostBreakup {
            effective_unit_cost: price.unit_amount,
            selected_tier_index: -1,
            tier_unit_amount: price.unit_amount,
            final_cost: price.unit_amount,
        }
    }

    fn resolve_package(price: &Price, quantity: Decimal) -> CostBreakup {
        if quantity <= Decimal::ZERO {
            return CostBreakup::zero();
        }

        // Constructor guarantees transform_quantity is present with divide_by > 0
        let transform = match price.transform_quantity {
            Some(t) => t,
            None => return CostBreakup::zero(),
        };

        let divide_by = Decimal::from(transform.divide_by);
        let packages = match transform.round {
            TransformRound::Up => (quantity / divide_by).ceil(),
            TransformRound::Down => (quantity / divide_by).floor(),
        };

        let final_cost = packages * price.unit_amount;

        debug!(
            "package price {} resolved: quantity {} -> {} packages of {}",
            price.id, quantity, packages, transform.divide_by
        );

        CostBreakup {
            effective_unit_cost: final_cost / quantity,
            selected_tier_index: -1,
            tier_unit_amount: price.unit_amount / divide_by,
            final_cost,
        }
    }

    /// Volume mode: the whole quantity is priced at the single tier whose
    /// bound is the smallest one >= quantity (a quantity exactly on a bound
    /// belongs to that tier), falling back to the unbounded tier.
    fn resolve_volume(price: &Price, quantity: Decimal) -> CostBreakup {
        if quantity <= Decimal::ZERO {
            return CostBreakup::zero();
        }

        // Tiers are validated ascending, so the first matching bound is the
        // smallest one
        let (index, tier) = price
            .tiers
            .iter()
            .enumerate()
            .find(|(_, tier)| match tier.upper_bound() {
                Some(bound) => quantity <= bound,
                None => true,
            })
            .unwrap_or_else(|| {
                // Quantity exceeds every bounded tier and no unbounded tier
                // exists: charge the highest band
                let last = price.tiers.len() - 1;
                (last, &price.tiers[last])
            });

        let flat_amount = tier.flat_amount.unwrap_or(Decimal::ZERO);
        let final_cost = quantity * tier.unit_amount + flat_amount;

        CostBreakup {
            effective_unit_cost: final_cost / quantity,
            selected_tier_index: index as i32,
            tier_unit_amount: tier.unit_amount,
            final_cost,
        }
    }

    /// Graduated mode: quantity is consumed band by band in ascending order,
    /// each band billed at its own unit amount, plus the flat amount of the
    /// final tier reached.
    fn resolve_graduated(price: &Price, quantity: Decimal) -> CostBreakup {
        if quantity <= Decimal::ZERO {
            return CostBreakup::zero();
        }

        let mut final_cost = Decimal::ZERO;
        let mut consumed = Decimal::ZERO;
        let mut last_index = 0usize;

        for (index, tier) in price.tiers.iter().enumerate() {
            let band_end = match tier.upper_bound() {
                Some(bound) => bound.min(quantity),
                None => quantity,
            };
            let band_quantity = band_end - consumed;
            if band_quantity <= Decimal::ZERO {
                break;
            }

            final_cost += band_quantity * tier.unit_amount;
            consumed = band_end;
            last_index = index;

            if consumed >= quantity {
                break;
            }
        }

        // Flat amount of the final tier reached, not of every tier crossed
        let last_tier = &price.tiers[last_index];
        if let Some(flat_amount) = last_tier.flat_amount {
            final_cost += flat_amount;
        }

        debug!(
            "graduated price {} resolved: quantity {} across {} tier(s) -> {}",
            price.id,
            quantity,
            last_index + 1,
            final_cost
        );

        CostBreakup {
            effective_unit_cost: final_cost / quantity,
            selected_tier_index: last_index as i32,
            tier_unit_amount: last_tier.unit_amount,
            final_cost,
        }
    }
}
