pub mod line_item_pricer;
pub mod tier_resolver;

pub use line_item_pricer::LineItemPricer;
pub use tier_resolver::{CostBreakup, PriceTierResolver};
