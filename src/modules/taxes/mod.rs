// Taxes module

pub mod models;
pub mod services;

pub use models::{ResolvedTaxRate, TaxApplied, TaxRateType};
pub use services::{TaxEngine, TaxResult};
