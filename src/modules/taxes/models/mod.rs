mod tax_rate;

pub use tax_rate::{ResolvedTaxRate, TaxApplied, TaxRateType};
