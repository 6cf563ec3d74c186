use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::Currency;
use crate::modules::coupons::models::CouponApplication;
use crate::modules::taxes::models::TaxApplied;

/// Computed invoice totals, rounded to the currency scale
///
/// Terminal value: a recomputation (for example after a voided coupon)
/// produces a new `InvoiceTotals`, it never mutates a finalized one. All
/// monetary fields are non-negative and
/// `total == max(0, subtotal - total_discount) + total_tax` holds over the
/// rounded fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    pub currency: Currency,

    /// Sum of line item gross amounts
    pub subtotal: Decimal,

    /// Line-item-phase plus invoice-phase discounts
    pub total_discount: Decimal,

    pub total_tax: Decimal,

    pub total: Decimal,

    pub amount_due: Decimal,

    pub amount_paid: Decimal,

    /// `max(0, total - amount_paid)`
    pub amount_remaining: Decimal,

    /// Audit trail: one record per applied coupon, in application order
    pub coupon_applications: Vec<CouponApplication>,

    /// Audit trail: one record per applied tax rate
    pub taxes_applied: Vec<TaxApplied>,
}
