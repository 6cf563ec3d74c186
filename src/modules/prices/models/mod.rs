mod price;

pub use price::{BillingModel, Price, PriceTier, TierMode, TransformQuantity, TransformRound};
