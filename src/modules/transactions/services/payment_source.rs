use crate::core::{AppError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

/// Half-open time range [start, end) a payment listing is restricted to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ImportWindow {
    /// Timestamp format the remote listing API expects
    pub const TIME_FORMAT: &'static str = "%Y-%m-%dT%H:%M:%SZ";

    pub fn start_param(&self) -> String {
        self.start.format(Self::TIME_FORMAT).to_string()
    }

    pub fn end_param(&self) -> String {
        self.end.format(Self::TIME_FORMAT).to_string()
    }
}

/// One payment as the processor reports it
///
/// Read-only view over the remote resource. The typed fields cover what the
/// importer maps; `raw` keeps the full payload for the audit log.
#[derive(Debug, Clone)]
pub struct RemotePayment {
    pub id: String,
    pub create_time: DateTime<Utc>,
    pub state: String,
    pub sub_transactions: Vec<RemoteSubTransaction>,
    pub raw: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteSubTransaction {
    #[serde(default)]
    pub description: Option<String>,
    pub amount: RemoteAmount,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteAmount {
    /// Textual decimal, parsed exactly by the importer
    pub total: String,
    pub currency: String,
}

#[derive(Deserialize)]
struct WirePayment {
    id: String,
    create_time: DateTime<Utc>,
    state: String,
    #[serde(default)]
    transactions: Vec<RemoteSubTransaction>,
}

impl RemotePayment {
    /// Build the typed view from one raw payment object
    pub fn from_value(raw: Value) -> Result<Self> {
        let wire: WirePayment = serde_json::from_value(raw.clone()).map_err(|e| {
            AppError::gateway(format!("Malformed payment resource: {}", e))
        })?;

        Ok(Self {
            id: wire.id,
            create_time: wire.create_time,
            state: wire.state,
            sub_transactions: wire.transactions,
            raw,
        })
    }
}

/// Remote payment listing seam
///
/// Implemented by the PayPal REST client; test doubles stand in for it so
/// the importer can be exercised without a network.
#[async_trait]
pub trait PaymentSource: Send + Sync {
    /// Fetch every payment created inside the window, all pages
    async fn list_payments(&self, window: &ImportWindow) -> Result<Vec<RemotePayment>>;
}
