//! BillForge Invoice Pricing Engine
//!
//! Turns priced line items, tiered pricing rules, stacked coupon discounts and
//! resolved tax rates into final, auditable invoice totals. Every operation is
//! a pure function over in-memory value types: no I/O, no shared mutable
//! state, and identical inputs always produce byte-identical decimal results.
//!
//! Upstream collaborators supply already-validated prices, coupons resolved to
//! their scope, and tax rates matched to the right entity; downstream
//! consumers persist and render the produced [`InvoiceTotals`].

pub mod core;
pub mod modules;

// Re-export commonly used types
pub use crate::core::{AppError, Currency, Result};
pub use modules::coupons::{
    Coupon, CouponApplication, CouponCadence, CouponType, DiscountEngine, DiscountPhaseResult,
    InvoiceCoupon, LineItemCoupon,
};
pub use modules::invoices::{InvoiceTotals, InvoiceTotalsAssembler, LineItem};
pub use modules::prices::{
    BillingModel, CostBreakup, LineItemPricer, Price, PriceTier, PriceTierResolver, TierMode,
    TransformQuantity, TransformRound,
};
pub use modules::taxes::{ResolvedTaxRate, TaxApplied, TaxEngine, TaxRateType, TaxResult};
