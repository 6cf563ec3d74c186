// Invoices module

pub mod models;
pub mod services;

pub use models::{InvoiceTotals, LineItem};
pub use services::InvoiceTotalsAssembler;
