// Two-phase cascading discount computation
//
// Phase 1 applies line-item-scoped coupons, each against its target line's
// ORIGINAL amount (multiple coupons on one line do not cascade with each
// other). Phase 2 applies invoice-scoped coupons in caller order against a
// running total, so each one sees the result of the previous. The ordering is
// a documented contract, not an implementation detail: it changes the taxable
// base downstream.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::modules::coupons::models::{CouponApplication, InvoiceCoupon, LineItemCoupon};
use crate::modules::invoices::models::LineItem;

/// Outcome of one discount phase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountPhaseResult {
    pub total_discount: Decimal,
    /// One audit record per applied coupon, in application order
    pub applications: Vec<CouponApplication>,
}

impl DiscountPhaseResult {
    fn empty() -> Self {
        Self {
            total_discount: Decimal::ZERO,
            applications: Vec::new(),
        }
    }
}

/// Cascading discount computation over validated, already-filtered coupons
///
/// Expired or exhausted coupons must be filtered out by the caller (see
/// `Coupon::is_redeemable`); the engine assumes every supplied coupon applies.
pub struct DiscountEngine;

impl DiscountEngine {
    /// Phase 1: line-item-scoped coupons
    ///
    /// Each discount is computed against the target line's original amount and
    /// clamped to that amount, so a single coupon can never discount more than
    /// the line it targets. Coupons whose `line_item_id` matches no line item
    /// are skipped.
    pub fn apply_line_item_discounts(
        line_items: &[LineItem],
        coupons: &[LineItemCoupon],
    ) -> DiscountPhaseResult {
        if coupons.is_empty() {
            return DiscountPhaseResult::empty();
        }

        let mut total_discount = Decimal::ZERO;
        let mut applications = Vec::with_capacity(coupons.len());

        for line_item_coupon in coupons {
            let target = line_items
                .iter()
                .find(|item| item.id == line_item_coupon.line_item_id);

            let target = match target {
                Some(item) => item,
                None => {
                    warn!(
                        "line item {} not found for coupon {}, skipping",
                        line_item_coupon.line_item_id, line_item_coupon.coupon.id
                    );
                    continue;
                }
            };

            // Always against the original line amount: line-item discounts do
            // not cascade with each other
            let discount = line_item_coupon
                .coupon
                .calculate_discount(target.amount)
                .min(target.amount);

            debug!(
                "applied line item coupon {} to {}: base {}, discount {}",
                line_item_coupon.coupon.id, target.id, target.amount, discount
            );

            applications.push(CouponApplication::record(
                &line_item_coupon.coupon,
                line_item_coupon.association_id.clone(),
                Some(target.id.clone()),
                target.amount,
                discount,
            ));
            total_discount += discount;
        }

        DiscountPhaseResult {
            total_discount,
            applications,
        }
    }

    /// Phase 2: invoice-scoped coupons against a running total
    ///
    /// Coupons are applied in the order supplied by the caller; each discount
    /// is computed against the current running total and clamped to it, so the
    /// running total never goes negative.
    pub fn apply_invoice_discounts(
        running_subtotal: Decimal,
        coupons: &[InvoiceCoupon],
    ) -> DiscountPhaseResult {
        if coupons.is_empty() {
            return DiscountPhaseResult::empty();
        }

        let mut running_total = running_subtotal.max(Decimal::ZERO);
        let mut total_discount = Decimal::ZERO;
        let mut applications = Vec::with_capacity(coupons.len());

        for invoice_coupon in coupons {
            let discount = invoice_coupon
                .coupon
                .calculate_discount(running_total)
                .min(running_total);

            debug!(
                "applied invoice coupon {}: running total {}, discount {}",
                invoice_coupon.coupon.id, running_total, discount
            );

            applications.push(CouponApplication::record(
                &invoice_coupon.coupon,
                invoice_coupon.association_id.clone(),
                None,
                running_total,
                discount,
            ));

            running_total -= discount;
            total_discount += discount;
        }

        DiscountPhaseResult {
            total_discount,
            applications,
        }
    }
}
