pub mod currency_repository;

pub use currency_repository::{CurrencyStore, SqlCurrencyRepository};
