pub mod import_service;
pub mod payment_source;

pub use import_service::{map_payment_state, ImportSummary, TransactionImporter};
pub use payment_source::{
    ImportWindow, PaymentSource, RemoteAmount, RemotePayment, RemoteSubTransaction,
};
