mod association;
mod coupon;

pub use association::{CouponApplication, InvoiceCoupon, LineItemCoupon};
pub use coupon::{Coupon, CouponCadence, CouponType, DiscountResult};
