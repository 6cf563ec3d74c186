// Prices module

pub mod models;
pub mod services;

pub use models::{BillingModel, Price, PriceTier, TierMode, TransformQuantity, TransformRound};
pub use services::{CostBreakup, LineItemPricer, PriceTierResolver};
