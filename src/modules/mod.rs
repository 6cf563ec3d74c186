pub mod coupons;
pub mod invoices;
pub mod prices;
pub mod taxes;
