// Coupon model with type/cadence validation
//
// A coupon is scope-agnostic: whether it discounts a single line item or the
// whole invoice is decided by the association that attaches it (see
// association.rs). Field pairings (Fixed vs amount_off, Percentage vs
// percentage_off, Repeated vs duration_in_periods) are validated here, at
// construction, never during discount computation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::core::{AppError, Currency, Result};

/// How a coupon's discount is expressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CouponType {
    /// Flat amount off the base
    Fixed,
    /// Percentage of the base, in [0, 100]
    Percentage,
}

/// How often a coupon applies across billing periods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CouponCadence {
    /// Applies to a single invoice
    Once,
    /// Applies for `duration_in_periods` consecutive periods
    Repeated,
    /// Applies to every invoice for the subscription lifetime
    Forever,
}

/// Result of applying a coupon's discount to a base amount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountResult {
    /// The discount amount applied (clamped so the final price is never negative)
    pub discount: Decimal,
    /// The base after the discount
    pub final_price: Decimal,
}

/// A discount rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coupon {
    pub id: String,
    pub name: String,
    pub coupon_type: CouponType,
    /// Required and positive iff the type is Fixed
    pub amount_off: Option<Decimal>,
    /// Required and in [0, 100] iff the type is Percentage
    pub percentage_off: Option<Decimal>,
    pub cadence: CouponCadence,
    /// Required and positive iff the cadence is Repeated
    pub duration_in_periods: Option<u32>,
    pub redeem_after: Option<DateTime<Utc>>,
    pub redeem_before: Option<DateTime<Utc>>,
    pub max_redemptions: Option<u32>,
    pub total_redemptions: u32,
    pub currency: Currency,
    /// Opaque metadata; never consumed by the pricing core
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl Coupon {
    /// Create a fixed-amount coupon
    pub fn fixed(
        id: impl Into<String>,
        name: impl Into<String>,
        amount_off: Decimal,
        cadence: CouponCadence,
        duration_in_periods: Option<u32>,
        currency: Currency,
    ) -> Result<Self> {
        if amount_off <= Decimal::ZERO {
            return Err(AppError::invalid_amount(
                amount_off,
                "fixed coupon amount_off must be positive",
            ));
        }

        Self::validate_cadence(cadence, duration_in_periods)?;

        Ok(Self {
            id: id.into(),
            name: name.into(),
            coupon_type: CouponType::Fixed,
            amount_off: Some(amount_off),
            percentage_off: None,
            cadence,
            duration_in_periods,
            redeem_after: None,
            redeem_before: None,
            max_redemptions: None,
            total_redemptions: 0,
            currency,
            metadata: HashMap::new(),
        })
    }

    /// Create a percentage coupon
    pub fn percentage(
        id: impl Into<String>,
        name: impl Into<String>,
        percentage_off: Decimal,
        cadence: CouponCadence,
        duration_in_periods: Option<u32>,
        currency: Currency,
    ) -> Result<Self> {
        if percentage_off < Decimal::ZERO || percentage_off > Decimal::ONE_HUNDRED {
            return Err(AppError::invalid_amount(
                percentage_off,
                "percentage_off must be between 0 and 100",
            ));
        }

        Self::validate_cadence(cadence, duration_in_periods)?;

        Ok(Self {
            id: id.into(),
            name: name.into(),
            coupon_type: CouponType::Percentage,
            amount_off: None,
            percentage_off: Some(percentage_off),
            cadence,
            duration_in_periods,
            redeem_after: None,
            redeem_before: None,
            max_redemptions: None,
            total_redemptions: 0,
            currency,
            metadata: HashMap::new(),
        })
    }

    fn validate_cadence(cadence: CouponCadence, duration: Option<u32>) -> Result<()> {
        match (cadence, duration) {
            (CouponCadence::Repeated, Some(periods)) if periods > 0 => Ok(()),
            (CouponCadence::Repeated, _) => Err(AppError::validation(
                "Repeated cadence requires duration_in_periods > 0",
            )),
            (_, Some(_)) => Err(AppError::validation(
                "duration_in_periods is only valid with Repeated cadence",
            )),
            (_, None) => Ok(()),
        }
    }

    /// Set the redemption validity window
    pub fn with_redemption_window(
        mut self,
        redeem_after: Option<DateTime<Utc>>,
        redeem_before: Option<DateTime<Utc>>,
    ) -> Result<Self> {
        if let (Some(after), Some(before)) = (redeem_after, redeem_before) {
            if after >= before {
                return Err(AppError::validation(
                    "redeem_after must be before redeem_before",
                ));
            }
        }

        self.redeem_after = redeem_after;
        self.redeem_before = redeem_before;
        Ok(self)
    }

    /// Cap the number of redemptions
    pub fn with_max_redemptions(mut self, max_redemptions: u32) -> Result<Self> {
        if max_redemptions == 0 {
            return Err(AppError::validation("max_redemptions must be positive"));
        }
        self.max_redemptions = Some(max_redemptions);
        Ok(self)
    }

    /// Check whether the coupon can be redeemed at `now`
    ///
    /// Callers filter coupons with this before handing them to the discount
    /// engine; the engine itself assumes already-validated, redeemable input.
    pub fn is_redeemable(&self, now: DateTime<Utc>) -> bool {
        if let Some(after) = self.redeem_after {
            if now < after {
                return false;
            }
        }

        if let Some(before) = self.redeem_before {
            if now > before {
                return false;
            }
        }

        if let Some(max) = self.max_redemptions {
            if self.total_redemptions >= max {
                return false;
            }
        }

        true
    }

    /// Discount for a base amount, unclamped
    ///
    /// Fixed coupons return their amount_off verbatim even when it exceeds the
    /// base; clamping is the call site's responsibility because line-item and
    /// invoice scopes clamp against different bases.
    pub fn calculate_discount(&self, base: Decimal) -> Decimal {
        match self.coupon_type {
            CouponType::Fixed => self.amount_off.unwrap_or(Decimal::ZERO),
            CouponType::Percentage => {
                base * self.percentage_off.unwrap_or(Decimal::ZERO) / Decimal::ONE_HUNDRED
            }
        }
    }

    /// Discount and final price in one step, clamped so the final price never
    /// goes below zero (the discount is adjusted down to the base)
    pub fn apply_discount(&self, base: Decimal) -> DiscountResult {
        let mut discount = self.calculate_discount(base);
        let mut final_price = base - discount;

        if final_price < Decimal::ZERO {
            discount = base;
            final_price = Decimal::ZERO;
        }

        DiscountResult {
            discount,
            final_price,
        }
    }
}
