use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use super::payment_method::{ConfigField, PaymentMethod};
use crate::core::{AppError, Result};
use crate::modules::currencies::repositories::CurrencyStore;
use crate::modules::gateways::models::{GatewayAccount, GatewayEnvironment};
use crate::modules::gateways::repositories::GatewayStore;
use crate::modules::transactions::repositories::TransactionStore;
use crate::modules::transactions::services::{
    ImportSummary, ImportWindow, PaymentSource, RemotePayment, TransactionImporter,
};

/// PayPal REST API client
///
/// Authenticates with the OAuth2 client-credentials grant and lists the
/// account's payments. The token is fetched once per listing call; runs are
/// short-lived so nothing is cached across them.
pub struct PaypalClient {
    client: Client,
    client_id: String,
    client_secret: String,
    base_url: String,
    page_size: u32,
}

impl PaypalClient {
    pub fn new(
        client_id: String,
        client_secret: String,
        environment: GatewayEnvironment,
        page_size: u32,
    ) -> Self {
        let base_url = match environment {
            GatewayEnvironment::Live => "https://api-m.paypal.com",
            GatewayEnvironment::Sandbox => "https://api-m.sandbox.paypal.com",
        }
        .to_string();

        Self {
            client: Client::new(),
            client_id,
            client_secret,
            base_url,
            page_size,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Obtain a bearer token via `POST /v1/oauth2/token`
    async fn access_token(&self) -> Result<String> {
        #[derive(Deserialize)]
        struct TokenResponse {
            access_token: String,
        }

        let url = format!("{}/v1/oauth2/token", self.base_url);

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| AppError::gateway(format!("PayPal token request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response.text().await.unwrap_or_default();
            return Err(AppError::gateway(format!(
                "PayPal token request returned {}: {}",
                status, error_body
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AppError::gateway(format!("Failed to parse PayPal token response: {}", e)))?;

        Ok(token.access_token)
    }

    /// Fetch one listing page via `GET /v1/payments/payment`
    async fn fetch_page(
        &self,
        token: &str,
        window: &ImportWindow,
        start_id: Option<&str>,
    ) -> Result<Value> {
        let url = format!("{}/v1/payments/payment", self.base_url);

        let mut query: Vec<(&str, String)> = vec![
            ("start_time", window.start_param()),
            ("end_time", window.end_param()),
            ("count", self.page_size.to_string()),
        ];
        if let Some(id) = start_id {
            query.push(("start_id", id.to_string()));
        }

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .query(&query)
            .send()
            .await
            .map_err(|e| AppError::gateway(format!("PayPal listing request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response.text().await.unwrap_or_default();
            return Err(AppError::gateway(format!(
                "PayPal listing returned {}: {}",
                status, error_body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::gateway(format!("Failed to parse PayPal listing page: {}", e)))
    }
}

#[async_trait]
impl PaymentSource for PaypalClient {
    async fn list_payments(&self, window: &ImportWindow) -> Result<Vec<RemotePayment>> {
        let token = self.access_token().await?;

        let mut payments = Vec::new();
        let mut start_id: Option<String> = None;

        loop {
            let page = self.fetch_page(&token, window, start_id.as_deref()).await?;

            let batch = page
                .get("payments")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default();
            debug!(count = batch.len(), "fetched payment listing page");

            for value in batch {
                payments.push(RemotePayment::from_value(value)?);
            }

            // cursor pagination; the last page carries no next_id
            start_id = page
                .get("next_id")
                .and_then(Value::as_str)
                .map(str::to_owned);
            if start_id.is_none() {
                break;
            }
        }

        Ok(payments)
    }
}

/// The "paypal" payment method
///
/// Registered in the method registry next to whatever other methods the
/// deployment carries. Loads its gateway settings, builds a client with the
/// account's credentials and hands the run to the importer.
pub struct PaypalMethod {
    transactions: Arc<dyn TransactionStore>,
    currencies: Arc<dyn CurrencyStore>,
    gateways: Arc<dyn GatewayStore>,
    page_size: u32,
}

impl PaypalMethod {
    pub const METHOD: &'static str = "paypal";

    pub fn new(
        transactions: Arc<dyn TransactionStore>,
        currencies: Arc<dyn CurrencyStore>,
        gateways: Arc<dyn GatewayStore>,
        page_size: u32,
    ) -> Self {
        Self {
            transactions,
            currencies,
            gateways,
            page_size,
        }
    }
}

#[async_trait]
impl PaymentMethod for PaypalMethod {
    fn name(&self) -> &str {
        Self::METHOD
    }

    fn label(&self) -> &str {
        "PayPal"
    }

    fn config_fields(&self) -> Vec<ConfigField> {
        vec![
            ConfigField {
                key: "paypal_email",
                label: "Email",
                required: true,
                secret: false,
            },
            ConfigField {
                key: "paypal_client_id",
                label: "Client ID",
                required: true,
                secret: false,
            },
            ConfigField {
                key: "paypal_client_secret",
                label: "Client Secret",
                required: true,
                secret: true,
            },
        ]
    }

    async fn import_transactions(&self, account: &GatewayAccount) -> Result<ImportSummary> {
        let gateway = self
            .gateways
            .find_paypal(&account.id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!(
                    "Gateway '{}' has no PayPal configuration",
                    account.id
                ))
            })?;

        let (client_id, client_secret) = gateway.credentials()?;
        let client = PaypalClient::new(
            client_id.to_string(),
            client_secret.to_string(),
            account.environment,
            self.page_size,
        );

        let importer = TransactionImporter::new(
            Arc::new(client),
            Arc::clone(&self.transactions),
            Arc::clone(&self.currencies),
            Arc::clone(&self.gateways),
        );

        importer.import_transactions(&gateway).await
    }
}
