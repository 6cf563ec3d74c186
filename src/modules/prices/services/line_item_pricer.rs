use rust_decimal::Decimal;

use crate::modules::prices::models::Price;
use crate::modules::prices::services::tier_resolver::PriceTierResolver;

/// Computes a line item's gross (pre-discount) amount
///
/// Thin wrapper over the tier resolver. Pure and deterministic: identical
/// `(price, quantity)` pairs always yield the identical decimal amount,
/// independent of invocation order or concurrent calls, so invoice
/// recomputation and idempotent retries are safe.
pub struct LineItemPricer;

impl LineItemPricer {
    /// Gross amount for `quantity` units of `price`, full precision
    pub fn price(price: &Price, quantity: Decimal) -> Decimal {
        PriceTierResolver::resolve(price, quantity).final_cost
    }
}
