pub mod totals_assembler;

pub use totals_assembler::InvoiceTotalsAssembler;
