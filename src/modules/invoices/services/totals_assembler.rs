// Single-pass pipeline from priced line items to final invoice totals
//
// Orchestrates the discount engine and tax engine over already-resolved
// inputs. Holds no state of its own; the only output is the immutable
// `InvoiceTotals` record. This is also the rounding boundary: everything
// upstream computes at full precision, and the totals here are rounded to the
// invoice currency's scale with banker's rounding.

use rust_decimal::Decimal;
use tracing::debug;

use crate::core::{AppError, Currency, Result};
use crate::modules::coupons::models::{InvoiceCoupon, LineItemCoupon};
use crate::modules::coupons::services::DiscountEngine;
use crate::modules::invoices::models::{InvoiceTotals, LineItem};
use crate::modules::taxes::models::ResolvedTaxRate;
use crate::modules::taxes::services::TaxEngine;

/// Assembles final invoice totals from line items, coupons and tax rates
pub struct InvoiceTotalsAssembler;

impl InvoiceTotalsAssembler {
    /// Compute the totals for one invoice
    ///
    /// Pipeline: subtotal -> line-item discounts -> adjusted subtotal ->
    /// invoice discounts (caller order, cascading) -> taxable base -> tax ->
    /// total. Every subtraction that could go negative is floor-clamped to
    /// zero; an invoice never shows a negative amount.
    ///
    /// Fails only when a line item's currency does not match the invoice
    /// currency; the computation itself cannot fail for validated inputs.
    pub fn assemble(
        currency: Currency,
        line_items: &[LineItem],
        line_item_coupons: &[LineItemCoupon],
        invoice_coupons: &[InvoiceCoupon],
        tax_rates: &[ResolvedTaxRate],
        amount_paid: Decimal,
    ) -> Result<InvoiceTotals> {
        for item in line_items {
            if item.currency != currency {
                return Err(AppError::CurrencyMismatch {
                    expected: currency,
                    got: item.currency,
                });
            }
        }

        let subtotal: Decimal = line_items.iter().map(|item| item.amount).sum();
        let subtotal = currency.round(subtotal);

        // Phase 1: line-item-scoped coupons, each against its line's original
        // amount
        let line_item_phase = DiscountEngine::apply_line_item_discounts(line_items, line_item_coupons);
        let adjusted_subtotal = (subtotal - line_item_phase.total_discount).max(Decimal::ZERO);

        // Phase 2: invoice-scoped coupons cascade over the running total
        let invoice_phase = DiscountEngine::apply_invoice_discounts(adjusted_subtotal, invoice_coupons);

        let total_discount =
            currency.round(line_item_phase.total_discount + invoice_phase.total_discount);

        // Taxable base is the discounted subtotal, floored at zero
        let taxable_amount = (subtotal - total_discount).max(Decimal::ZERO);

        let mut tax_result = TaxEngine::compute_tax(taxable_amount, tax_rates);
        // Round each per-rate contribution so the audit records sum exactly to
        // the reported total tax
        for applied in &mut tax_result.taxes_applied {
            applied.tax_amount = currency.round(applied.tax_amount);
        }
        let total_tax: Decimal = tax_result
            .taxes_applied
            .iter()
            .map(|applied| applied.tax_amount)
            .sum();

        let total = (taxable_amount + total_tax).max(Decimal::ZERO);
        let amount_due = total;
        let amount_remaining = (total - amount_paid).max(Decimal::ZERO);

        debug!(
            "assembled invoice totals: subtotal {}, discount {}, tax {}, total {}",
            subtotal, total_discount, total_tax, total
        );

        let mut coupon_applications = line_item_phase.applications;
        coupon_applications.extend(invoice_phase.applications);

        Ok(InvoiceTotals {
            currency,
            subtotal,
            total_discount,
            total_tax,
            total,
            amount_due,
            amount_paid,
            amount_remaining,
            coupon_applications,
            taxes_applied: tax_result.taxes_applied,
        })
    }
}
