// Price model with billing-model invariants enforced at construction
//
// A price is an immutable snapshot of one billable unit configuration.
// Changing a price means creating a new one, never mutating in place, so
// historical invoices stay reproducible. Construction-time validation is the
// single source of truth: the tier resolver trusts these invariants and does
// not re-validate.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Currency, Result};

/// Pricing shape of a billable unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingModel {
    /// Fixed fee, independent of quantity
    FlatFee,
    /// Quantity bucketed by a divisor, each bucket billed at the unit amount
    Package,
    /// Banded unit cost; band selection governed by the tier mode
    Tiered,
}

/// How tiers consume quantity for a Tiered price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TierMode {
    /// The whole quantity is priced at the single tier it falls into
    Volume,
    /// Quantity is split across tiers cumulatively, band by band
    Graduated,
}

/// Rounding direction for a package quantity transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformRound {
    Up,
    Down,
}

/// Quantity transform for Package prices: bill ceil/floor(quantity / divide_by)
/// packages at the price's unit amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformQuantity {
    pub divide_by: u64,
    pub round: TransformRound,
}

/// One band of a tiered price
///
/// `up_to` is the inclusive upper bound of the band; `None` marks the final,
/// unbounded tier. `flat_amount` is a fixed fee added when the tier is reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceTier {
    pub up_to: Option<u64>,
    pub unit_amount: Decimal,
    pub flat_amount: Option<Decimal>,
}

impl PriceTier {
    pub fn new(up_to: Option<u64>, unit_amount: Decimal) -> Self {
        Self {
            up_to,
            unit_amount,
            flat_amount: None,
        }
    }

    pub fn with_flat_amount(mut self, flat_amount: Decimal) -> Self {
        self.flat_amount = Some(flat_amount);
        self
    }

    /// Upper bound of this tier as a decimal, or None for the unbounded tier
    pub fn upper_bound(&self) -> Option<Decimal> {
        self.up_to.map(Decimal::from)
    }
}

/// One billable unit configuration
///
/// Exactly one of {flat unit amount, tiers, transform quantity} is semantically
/// active per billing model. Build through `flat_fee`, `package` or `tiered`;
/// there is no other way to obtain a `Price`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub id: String,
    pub billing_model: BillingModel,
    /// Only meaningful for Tiered prices
    pub tier_mode: Option<TierMode>,
    /// Non-empty iff the model is Tiered
    pub tiers: Vec<PriceTier>,
    /// Only meaningful for Package prices
    pub transform_quantity: Option<TransformQuantity>,
    /// Per-unit (FlatFee) or per-package (Package) amount
    pub unit_amount: Decimal,
    pub currency: Currency,
}

impl Price {
    /// Create a flat-fee price: the unit amount is charged regardless of quantity
    pub fn flat_fee(id: impl Into<String>, unit_amount: Decimal, currency: Currency) -> Result<Self> {
        if unit_amount < Decimal::ZERO {
            return Err(AppError::invalid_amount(
                unit_amount,
                "flat fee unit amount must be non-negative",
            ));
        }

        Ok(Self {
            id: id.into(),
            billing_model: BillingModel::FlatFee,
            tier_mode: None,
            tiers: Vec::new(),
            transform_quantity: None,
            unit_amount,
            currency,
        })
    }

    /// Create a package price: quantity is divided into packages of
    /// `transform.divide_by` units, each billed at `unit_amount`
    pub fn package(
        id: impl Into<String>,
        unit_amount: Decimal,
        transform: TransformQuantity,
        currency: Currency,
    ) -> Result<Self> {
        if unit_amount < Decimal::ZERO {
            return Err(AppError::invalid_amount(
                unit_amount,
                "package unit amount must be non-negative",
            ));
        }

        if transform.divide_by == 0 {
            return Err(AppError::validation(
                "Package price requires transform_quantity.divide_by > 0",
            ));
        }

        Ok(Self {
            id: id.into(),
            billing_model: BillingModel::Package,
            tier_mode: None,
            tiers: Vec::new(),
            transform_quantity: Some(transform),
            unit_amount,
            currency,
        })
    }

    /// Create a tiered price with the given tier mode and bands
    pub fn tiered(
        id: impl Into<String>,
        tier_mode: TierMode,
        tiers: Vec<PriceTier>,
        currency: Currency,
    ) -> Result<Self> {
        Self::validate_tiers(&tiers)?;

        Ok(Self {
            id: id.into(),
            billing_model: BillingModel::Tiered,
            tier_mode: Some(tier_mode),
            tiers,
            transform_quantity: None,
            unit_amount: Decimal::ZERO,
            currency,
        })
    }

    fn validate_tiers(tiers: &[PriceTier]) -> Result<()> {
        if tiers.is_empty() {
            return Err(AppError::validation(
                "Tiered price requires at least one tier",
            ));
        }

        let mut previous_bound: Option<u64> = None;
        for (idx, tier) in tiers.iter().enumerate() {
            if tier.unit_amount <= Decimal::ZERO {
                return Err(AppError::invalid_amount(
                    tier.unit_amount,
                    format!("tier {} unit amount must be positive", idx),
                ));
            }

            if let Some(flat) = tier.flat_amount {
                if flat < Decimal::ZERO {
                    return Err(AppError::invalid_amount(
                        flat,
                        format!("tier {} flat amount must be non-negative", idx),
                    ));
                }
            }

            match tier.up_to {
                Some(up_to) => {
                    if let Some(prev) = previous_bound {
                        if up_to <= prev {
                            return Err(AppError::validation(format!(
                                "Tiers must be ordered ascending by up_to (tier {} bound {} <= {})",
                                idx, up_to, prev
                            )));
                        }
                    }
                    previous_bound = Some(up_to);
                }
                None => {
                    // At most one unbounded tier, and it must be last
                    if idx != tiers.len() - 1 {
                        return Err(AppError::validation(
                            "Only the final tier may omit up_to",
                        ));
                    }
                }
            }
        }

        Ok(())
    }
}
