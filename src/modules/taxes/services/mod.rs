pub mod tax_engine;

pub use tax_engine::{TaxEngine, TaxResult};
