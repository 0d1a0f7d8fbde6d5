// End-to-end importer behavior over in-memory stores: mapping, dedup,
// window bookkeeping and the abort paths.

#[path = "../helpers/mod.rs"]
mod helpers;

use chrono::{NaiveDate, TimeZone, Utc};
use helpers::*;
use payledger::core::AppError;
use payledger::modules::transactions::models::TransactionStatus;
use payledger::modules::transactions::services::TransactionImporter;
use rust_decimal_macros::dec;
use std::sync::Arc;

struct Harness {
    source: Arc<StubPaymentSource>,
    transactions: Arc<MemoryTransactionStore>,
    gateways: Arc<MemoryGatewayStore>,
    importer: TransactionImporter,
}

fn harness(payments: Vec<payledger::modules::transactions::services::RemotePayment>) -> Harness {
    let source = Arc::new(StubPaymentSource::new(payments));
    let transactions = Arc::new(MemoryTransactionStore::new());
    let gateways = Arc::new(MemoryGatewayStore::new(paypal_gateway()));
    let currencies = Arc::new(MemoryCurrencyStore::new(vec![usd(), eur()]));
    let importer = TransactionImporter::new(
        source.clone(),
        transactions.clone(),
        currencies,
        gateways.clone(),
    );
    Harness {
        source,
        transactions,
        gateways,
        importer,
    }
}

#[tokio::test]
async fn test_import_creates_ledger_transaction_from_payment() {
    let h = harness(vec![remote_payment(
        "PAY-1",
        "2020-01-01T00:00:00Z",
        "approved",
        "Invoice 42",
        "10.00",
        "USD",
    )]);

    let summary = h.importer.import_transactions(&paypal_gateway()).await.unwrap();

    assert_eq!(summary.fetched, 1);
    assert_eq!(summary.skipped, 0);
    assert_eq!(summary.imported, 1);

    let created = h.transactions.created();
    assert_eq!(created.len(), 1);
    let tx = &created[0];
    assert_eq!(tx.gateway_account_id, "gw-1");
    assert_eq!(tx.external_ref, "PAY-1");
    assert_eq!(tx.gateway_reference, "PAY-1");
    assert_eq!(tx.authorization_code, "PAY-1");
    assert_eq!(tx.description, "Invoice 42");
    assert_eq!(tx.transaction_date, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
    assert_eq!(tx.amount, dec!(10.00));
    assert_eq!(tx.currency_id, usd().id);
    assert_eq!(tx.status, TransactionStatus::Authorized);
    // the audit log carries the raw payload
    assert!(tx.log.contains("PAY-1"));
    assert!(tx.log.contains("sale"));
}

#[tokio::test]
async fn test_import_skips_already_recorded_payment() {
    let h = harness(vec![remote_payment(
        "PAY-1",
        "2020-01-01T00:00:00Z",
        "approved",
        "Invoice 42",
        "10.00",
        "USD",
    )]);
    h.transactions.seed(recorded_transaction("gw-1", "PAY-1"));

    let summary = h.importer.import_transactions(&paypal_gateway()).await.unwrap();

    assert_eq!(summary.fetched, 1);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.imported, 0);
    assert_eq!(h.transactions.created().len(), 1, "only the seeded record remains");
}

#[tokio::test]
async fn test_import_is_idempotent_on_identifier_across_runs() {
    let payment = remote_payment(
        "PAY-7",
        "2020-02-02T08:00:00Z",
        "created",
        "Order 7",
        "3.50",
        "EUR",
    );
    let h = harness(vec![payment]);

    let first = h.importer.import_transactions(&paypal_gateway()).await.unwrap();
    let second = h.importer.import_transactions(&paypal_gateway()).await.unwrap();

    assert_eq!(first.imported, 1);
    assert_eq!(second.imported, 0);
    assert_eq!(second.skipped, 1);
    assert_eq!(h.transactions.created().len(), 1);
}

#[tokio::test]
async fn test_empty_batch_touches_only_bookkeeping() {
    let h = harness(Vec::new());

    let summary = h.importer.import_transactions(&paypal_gateway()).await.unwrap();

    assert_eq!(summary, Default::default());
    assert!(h.transactions.created().is_empty());
    assert_eq!(h.gateways.window_advances().len(), 1);
    assert!(h.gateways.gateway().to_transactions.is_none());
}

#[tokio::test]
async fn test_missing_credentials_abort_before_any_call() {
    let h = harness(vec![remote_payment(
        "PAY-1",
        "2020-01-01T00:00:00Z",
        "approved",
        "Invoice 42",
        "10.00",
        "USD",
    )]);

    let err = h
        .importer
        .import_transactions(&paypal_gateway_without_credentials())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Configuration(_)), "got {:?}", err);
    assert_eq!(h.source.calls(), 0, "remote API must not be called");
    assert!(h.gateways.window_advances().is_empty());
    assert!(h.transactions.created().is_empty());
}

#[tokio::test]
async fn test_unknown_currency_aborts_batch() {
    let h = harness(vec![
        remote_payment(
            "PAY-1",
            "2020-01-01T00:00:00Z",
            "approved",
            "Invoice 42",
            "10.00",
            "USD",
        ),
        remote_payment(
            "PAY-2",
            "2020-01-02T00:00:00Z",
            "approved",
            "Invoice 43",
            "120.00",
            "THB",
        ),
    ]);

    let err = h.importer.import_transactions(&paypal_gateway()).await.unwrap_err();

    assert!(matches!(err, AppError::CurrencyNotFound(ref code) if code == "THB"));
    assert!(h.transactions.created().is_empty(), "whole batch aborts");
}

#[tokio::test]
async fn test_unmapped_state_aborts_batch() {
    let h = harness(vec![remote_payment(
        "PAY-1",
        "2020-01-01T00:00:00Z",
        "refunded",
        "Invoice 42",
        "10.00",
        "USD",
    )]);

    let err = h.importer.import_transactions(&paypal_gateway()).await.unwrap_err();

    assert!(matches!(err, AppError::UnmappedState(ref state) if state == "refunded"));
    assert!(h.transactions.created().is_empty());
}

#[tokio::test]
async fn test_fetch_failure_still_advances_window() {
    let transactions = Arc::new(MemoryTransactionStore::new());
    let gateways = Arc::new(MemoryGatewayStore::new(paypal_gateway()));
    let importer = TransactionImporter::new(
        Arc::new(FailingPaymentSource),
        transactions.clone(),
        Arc::new(MemoryCurrencyStore::new(vec![usd()])),
        gateways.clone(),
    );

    let err = importer.import_transactions(&paypal_gateway()).await.unwrap_err();

    assert!(matches!(err, AppError::Gateway(_)));
    // bookkeeping committed before the fetch; the failed interval is skipped
    assert_eq!(gateways.window_advances().len(), 1);
    assert!(transactions.created().is_empty());
}

#[tokio::test]
async fn test_query_window_comes_from_gateway_bookkeeping() {
    let h = harness(Vec::new());
    let mut gateway = paypal_gateway();
    gateway.to_transactions = Some(Utc.with_ymd_and_hms(2020, 2, 1, 0, 0, 0).unwrap());

    h.importer.import_transactions(&gateway).await.unwrap();

    let window = h.source.last_window().expect("source was queried");
    assert_eq!(window.start, gateway.from_transactions);
    assert_eq!(window.start_param(), "2020-01-01T00:00:00Z");
    assert_eq!(window.end_param(), "2020-02-01T00:00:00Z");
}
