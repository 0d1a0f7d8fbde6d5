use crate::core::{AppError, Result};
use crate::modules::transactions::services::ImportWindow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Base payment gateway record
///
/// One row per configured payment-processing endpoint. Method-specific
/// settings live in companion records (see [`PaypalGateway`]); this struct
/// carries only what every method shares.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GatewayAccount {
    pub id: String,
    pub name: String,

    /// Stable method key, e.g. "paypal"
    pub method: String,

    pub environment: GatewayEnvironment,
    pub is_active: bool,

    #[sqlx(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[sqlx(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "VARCHAR(10)", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum GatewayEnvironment {
    Sandbox,
    Live,
}

impl std::fmt::Display for GatewayEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GatewayEnvironment::Sandbox => write!(f, "sandbox"),
            GatewayEnvironment::Live => write!(f, "live"),
        }
    }
}

/// PayPal settings for one gateway account
///
/// Composed over [`GatewayAccount`] rather than widening it: other methods
/// keep their own companion records and the base row stays method-agnostic.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PaypalGateway {
    #[sqlx(flatten)]
    pub account: GatewayAccount,

    pub email: Option<String>,
    pub client_id: String,

    #[serde(skip_serializing)]
    pub client_secret: String,

    /// Start of the next import window; advanced to "now" on every run
    pub from_transactions: DateTime<Utc>,

    /// Optional upper bound for the next import window
    pub to_transactions: Option<DateTime<Utc>>,
}

impl PaypalGateway {
    /// Returns the REST credentials, or a Configuration error telling the
    /// operator to register them. Must pass before any network call.
    pub fn credentials(&self) -> Result<(&str, &str)> {
        if self.client_id.trim().is_empty() || self.client_secret.trim().is_empty() {
            return Err(AppError::configuration(format!(
                "Gateway '{}' has no PayPal REST credentials. Register a PayPal \
                 developer application and fill in the client id and client secret.",
                self.account.name
            )));
        }

        Ok((&self.client_id, &self.client_secret))
    }

    /// Query window for the next import run
    ///
    /// The window is [from_transactions, to_transactions), falling back to
    /// `now` when no upper bound is set.
    pub fn import_window(&self, now: DateTime<Utc>) -> ImportWindow {
        ImportWindow {
            start: self.from_transactions,
            end: self.to_transactions.unwrap_or(now),
        }
    }
}
