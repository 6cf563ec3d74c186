mod line_item;
mod totals;

pub use line_item::LineItem;
pub use totals::InvoiceTotals;
