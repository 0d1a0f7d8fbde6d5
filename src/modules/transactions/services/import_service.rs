use super::payment_source::{PaymentSource, RemotePayment};
use crate::core::{AppError, Result};
use crate::modules::currencies::repositories::CurrencyStore;
use crate::modules::gateways::models::PaypalGateway;
use crate::modules::gateways::repositories::GatewayStore;
use crate::modules::transactions::models::{LedgerTransaction, TransactionStatus};
use crate::modules::transactions::repositories::TransactionStore;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

/// Counters for one import run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    /// Payments the remote listing returned
    pub fetched: usize,
    /// Payments skipped because their reference was already recorded
    pub skipped: usize,
    /// Ledger transactions created
    pub imported: usize,
}

/// Map a remote payment state onto a ledger status
///
/// Total over the processor's state vocabulary; anything outside it is an
/// error, never a silent default.
pub fn map_payment_state(state: &str) -> Result<TransactionStatus> {
    match state {
        "created" | "pending" => Ok(TransactionStatus::Draft),
        "approved" | "in_progress" => Ok(TransactionStatus::Authorized),
        "failed" | "canceled" | "expired" => Ok(TransactionStatus::Cancelled),
        other => Err(AppError::UnmappedState(other.to_string())),
    }
}

/// Imports remote payments into the ledger
///
/// All collaborators are injected; the importer holds no connection pool or
/// global state of its own.
pub struct TransactionImporter {
    source: Arc<dyn PaymentSource>,
    transactions: Arc<dyn TransactionStore>,
    currencies: Arc<dyn CurrencyStore>,
    gateways: Arc<dyn GatewayStore>,
}

impl TransactionImporter {
    pub fn new(
        source: Arc<dyn PaymentSource>,
        transactions: Arc<dyn TransactionStore>,
        currencies: Arc<dyn CurrencyStore>,
        gateways: Arc<dyn GatewayStore>,
    ) -> Self {
        Self {
            source,
            transactions,
            currencies,
            gateways,
        }
    }

    /// Import all payments created inside the gateway's current window
    ///
    /// The window bookkeeping is written before the fetch and is not rolled
    /// back on failure: a run that dies after that write leaves its interval
    /// unimported and the next run starts from the advanced position.
    /// Exactly-once creation holds only under serialized invocation per
    /// gateway; concurrent runs can race the existence check.
    pub async fn import_transactions(&self, gateway: &PaypalGateway) -> Result<ImportSummary> {
        gateway.credentials()?;

        let now = Utc::now();
        let window = gateway.import_window(now);
        self.gateways
            .advance_import_window(&gateway.account.id, now)
            .await?;

        let payments = self.source.list_payments(&window).await?;
        if payments.is_empty() {
            debug!(
                gateway = %gateway.account.name,
                start = %window.start_param(),
                end = %window.end_param(),
                "no remote payments in window"
            );
            return Ok(ImportSummary::default());
        }

        let references: Vec<String> = payments.iter().map(|p| p.id.clone()).collect();
        let existing = self
            .transactions
            .existing_references(&gateway.account.id, &references)
            .await?;

        let mut records = Vec::with_capacity(payments.len());
        for payment in &payments {
            if existing.contains(&payment.id) {
                continue;
            }
            records.push(self.map_payment(gateway, payment).await?);
        }

        let skipped = payments.len() - records.len();
        if records.is_empty() {
            debug!(
                gateway = %gateway.account.name,
                skipped,
                "all fetched payments already recorded"
            );
            return Ok(ImportSummary {
                fetched: payments.len(),
                skipped,
                imported: 0,
            });
        }

        let imported = self.transactions.create_batch(&records).await?;
        info!(
            gateway = %gateway.account.name,
            imported,
            skipped,
            "imported payments into ledger"
        );

        Ok(ImportSummary {
            fetched: payments.len(),
            skipped,
            imported: imported as usize,
        })
    }

    /// Map one remote payment onto a new ledger transaction
    async fn map_payment(
        &self,
        gateway: &PaypalGateway,
        payment: &RemotePayment,
    ) -> Result<LedgerTransaction> {
        let sub = payment.sub_transactions.first().ok_or_else(|| {
            AppError::validation(format!(
                "Payment '{}' carries no transactions",
                payment.id
            ))
        })?;

        let amount: Decimal = sub.amount.total.parse().map_err(|e| {
            AppError::validation(format!(
                "Payment '{}' has unparseable amount {:?}: {}",
                payment.id, sub.amount.total, e
            ))
        })?;

        let currency = self
            .currencies
            .find_by_code(&sub.amount.currency)
            .await?
            .ok_or_else(|| AppError::CurrencyNotFound(sub.amount.currency.clone()))?;

        let status = map_payment_state(&payment.state)?;
        let log = serde_json::to_string(&payment.raw)?;

        LedgerTransaction::new(
            gateway.account.id.clone(),
            payment.id.clone(),
            payment.id.clone(),
            // the payment resource exposes no separate authorization code;
            // the payment id stands in for it
            payment.id.clone(),
            sub.description.clone().unwrap_or_default(),
            payment.create_time.date_naive(),
            amount,
            currency.id,
            status,
            log,
        )
    }
}
