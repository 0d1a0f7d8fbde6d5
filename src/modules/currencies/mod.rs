pub mod models;
pub mod repositories;

pub use models::Currency;
pub use repositories::{CurrencyStore, SqlCurrencyRepository};
