// LineItem model with gross amount computed at construction
//
// A line item owns an immutable snapshot of its price. The gross amount is
// computed once, when the line item is created for a billing period, and is
// never recomputed after the invoice is finalized.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Currency, Result};
use crate::modules::prices::models::Price;
use crate::modules::prices::services::LineItemPricer;

/// One billable component of an invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: String,

    /// Immutable price snapshot this line was billed under
    pub price: Price,

    /// Billed quantity or aggregated usage, non-negative
    pub quantity: Decimal,

    /// Gross pre-discount amount, computed once at construction, full precision
    pub amount: Decimal,

    /// Taken from the price; every line on an invoice must share the
    /// invoice currency
    pub currency: Currency,
}

impl LineItem {
    /// Create a line item, pricing `quantity` units under `price`
    pub fn new(id: impl Into<String>, price: Price, quantity: Decimal) -> Result<Self> {
        if quantity < Decimal::ZERO {
            return Err(AppError::invalid_amount(
                quantity,
                "line item quantity must be non-negative",
            ));
        }

        let amount = LineItemPricer::price(&price, quantity);
        let currency = price.currency;

        Ok(Self {
            id: id.into(),
            price,
            quantity,
            amount,
            currency,
        })
    }
}
