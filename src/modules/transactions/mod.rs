pub mod models;
pub mod repositories;
pub mod services;

pub use models::{LedgerTransaction, TransactionStatus};
pub use repositories::{SqlTransactionRepository, TransactionStore};
pub use services::{
    ImportSummary, ImportWindow, PaymentSource, RemotePayment, TransactionImporter,
};
