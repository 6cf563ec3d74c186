pub mod discount_engine;

pub use discount_engine::{DiscountEngine, DiscountPhaseResult};
