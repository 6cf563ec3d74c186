// Scope-carrying coupon associations and application audit records
//
// A coupon itself is scope-agnostic; the association that attaches it to an
// invoice or to a specific line item is what determines which discount phase
// it participates in. The supplied order of invoice-scoped associations is
// order-significant and must never be re-sorted.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::coupon::{Coupon, CouponType};

/// A coupon attached to a single line item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItemCoupon {
    pub coupon: Coupon,
    /// Identifier of the line item this coupon discounts
    pub line_item_id: String,
    /// Upstream association id, kept for the audit trail
    pub association_id: Option<String>,
}

impl LineItemCoupon {
    pub fn new(coupon: Coupon, line_item_id: impl Into<String>) -> Self {
        Self {
            coupon,
            line_item_id: line_item_id.into(),
            association_id: None,
        }
    }

    pub fn with_association_id(mut self, association_id: impl Into<String>) -> Self {
        self.association_id = Some(association_id.into());
        self
    }
}

/// A coupon attached to the whole invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceCoupon {
    pub coupon: Coupon,
    pub association_id: Option<String>,
}

impl InvoiceCoupon {
    pub fn new(coupon: Coupon) -> Self {
        Self {
            coupon,
            association_id: None,
        }
    }

    pub fn with_association_id(mut self, association_id: impl Into<String>) -> Self {
        self.association_id = Some(association_id.into());
        self
    }
}

/// Audit record for one applied coupon
///
/// Captures the base the discount was computed against, which for invoice
/// coupons is the running total at the time of application, not the original
/// subtotal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouponApplication {
    pub id: String,
    pub coupon_id: String,
    pub association_id: Option<String>,
    /// Set for line-item-scoped applications
    pub line_item_id: Option<String>,
    pub original_amount: Decimal,
    pub discount: Decimal,
    pub final_amount: Decimal,
    pub discount_type: CouponType,
    pub applied_at: DateTime<Utc>,
}

impl CouponApplication {
    pub(crate) fn record(
        coupon: &Coupon,
        association_id: Option<String>,
        line_item_id: Option<String>,
        original_amount: Decimal,
        discount: Decimal,
    ) -> Self {
        Self {
            id: format!("capp_{}", Uuid::new_v4().simple()),
            coupon_id: coupon.id.clone(),
            association_id,
            line_item_id,
            original_amount,
            discount,
            final_amount: original_amount - discount,
            discount_type: coupon.coupon_type,
            applied_at: Utc::now(),
        }
    }
}
