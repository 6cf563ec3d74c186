// Resolved tax rates and per-rate application records
//
// Rate resolution (matching a rate to an entity or jurisdiction) happens
// upstream; this model only represents a rate that has already been matched
// and validated for use on an invoice.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};

/// How a tax rate is expressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxRateType {
    /// Percentage of the taxable base, in [0, 100]
    Percentage,
    /// Flat amount, independent of the taxable base
    Fixed,
}

/// A tax rate already matched to an entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedTaxRate {
    pub id: String,
    pub rate_type: TaxRateType,
    /// Required and in [0, 100] iff the type is Percentage
    pub percentage_value: Option<Decimal>,
    /// Required and non-negative iff the type is Fixed
    pub fixed_value: Option<Decimal>,
}

impl ResolvedTaxRate {
    /// Create a percentage tax rate
    pub fn percentage(id: impl Into<String>, percentage_value: Decimal) -> Result<Self> {
        if percentage_value < Decimal::ZERO || percentage_value > Decimal::ONE_HUNDRED {
            return Err(AppError::invalid_amount(
                percentage_value,
                "tax percentage must be between 0 and 100",
            ));
        }

        Ok(Self {
            id: id.into(),
            rate_type: TaxRateType::Percentage,
            percentage_value: Some(percentage_value),
            fixed_value: None,
        })
    }

    /// Create a fixed tax rate
    pub fn fixed(id: impl Into<String>, fixed_value: Decimal) -> Result<Self> {
        if fixed_value < Decimal::ZERO {
            return Err(AppError::invalid_amount(
                fixed_value,
                "fixed tax value must be non-negative",
            ));
        }

        Ok(Self {
            id: id.into(),
            rate_type: TaxRateType::Fixed,
            percentage_value: None,
            fixed_value: Some(fixed_value),
        })
    }
}

/// Audit record for one tax rate applied to an invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxApplied {
    pub tax_rate_id: String,
    pub taxable_amount: Decimal,
    pub tax_amount: Decimal,
}
