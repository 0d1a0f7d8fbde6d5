use crate::core::{AppError, Result};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Ledger transaction status
///
/// The importer only ever writes Draft, Authorized or Cancelled; Done and
/// Refunded are reached by the ledger workflow after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "VARCHAR(20)", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Draft,
    Authorized,
    Done,
    Cancelled,
    Refunded,
}

impl Default for TransactionStatus {
    fn default() -> Self {
        TransactionStatus::Draft
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionStatus::Draft => write!(f, "draft"),
            TransactionStatus::Authorized => write!(f, "authorized"),
            TransactionStatus::Done => write!(f, "done"),
            TransactionStatus::Cancelled => write!(f, "cancelled"),
            TransactionStatus::Refunded => write!(f, "refunded"),
        }
    }
}

impl std::str::FromStr for TransactionStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "draft" => Ok(TransactionStatus::Draft),
            "authorized" => Ok(TransactionStatus::Authorized),
            "done" => Ok(TransactionStatus::Done),
            "cancelled" => Ok(TransactionStatus::Cancelled),
            "refunded" => Ok(TransactionStatus::Refunded),
            _ => Err(format!("Invalid transaction status: {}", s)),
        }
    }
}

/// Ledger transaction record
///
/// One recorded payment movement. Created once per unique external
/// reference per gateway; mutated afterwards only by the ledger workflow.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LedgerTransaction {
    pub id: String,

    /// Owning gateway account
    pub gateway_account_id: String,

    /// Payment processor's unique payment id, the deduplication key
    pub external_ref: String,

    pub description: String,

    /// Processor-side reference shown to operators
    pub gateway_reference: String,

    pub authorization_code: String,

    /// Day the payment was created on the processor side
    pub transaction_date: NaiveDate,

    pub amount: Decimal,
    pub currency_id: String,
    pub status: TransactionStatus,

    /// Raw processor payload, serialized JSON, kept for audits
    pub log: String,

    #[sqlx(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[sqlx(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl LedgerTransaction {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        gateway_account_id: String,
        external_ref: String,
        gateway_reference: String,
        authorization_code: String,
        description: String,
        transaction_date: NaiveDate,
        amount: Decimal,
        currency_id: String,
        status: TransactionStatus,
        log: String,
    ) -> Result<Self> {
        if external_ref.trim().is_empty() {
            return Err(AppError::validation(
                "External reference cannot be empty".to_string(),
            ));
        }

        if gateway_account_id.trim().is_empty() {
            return Err(AppError::validation(
                "Gateway account ID cannot be empty".to_string(),
            ));
        }

        if amount < Decimal::ZERO {
            return Err(AppError::validation(
                "Transaction amount must be non-negative".to_string(),
            ));
        }

        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            gateway_account_id,
            external_ref,
            description,
            gateway_reference,
            authorization_code,
            transaction_date,
            amount,
            currency_id,
            status,
            log,
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
        })
    }

    pub fn is_authorized(&self) -> bool {
        self.status == TransactionStatus::Authorized
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == TransactionStatus::Cancelled
    }
}
