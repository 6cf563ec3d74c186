// Coupons module

pub mod models;
pub mod services;

pub use models::{
    Coupon, CouponApplication, CouponCadence, CouponType, DiscountResult, InvoiceCoupon,
    LineItemCoupon,
};
pub use services::{DiscountEngine, DiscountPhaseResult};
