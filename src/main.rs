use std::sync::Arc;

use anyhow::Context;
use payledger::config::Config;
use payledger::core::AppError;
use payledger::modules::currencies::SqlCurrencyRepository;
use payledger::modules::gateways::repositories::{GatewayStore, SqlGatewayRepository};
use payledger::modules::gateways::services::{MethodRegistry, PaymentMethod, PaypalMethod};
use payledger::modules::transactions::SqlTransactionRepository;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Scheduler entrypoint: one import pass over every active gateway account
/// whose method is registered. Serialized invocation per gateway is the
/// scheduler's responsibility.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "payledger=info,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    config
        .validate()
        .context("Configuration validation failed")?;

    tracing::info!("Starting PayLedger gateway import run");
    tracing::info!("Environment: {}", config.app.env);

    // Create database connection pool
    let pool = config
        .database
        .create_pool()
        .await
        .context("Failed to create database pool")?;

    let gateway_repo = Arc::new(SqlGatewayRepository::new(pool.clone()));
    let transaction_repo = Arc::new(SqlTransactionRepository::new(pool.clone()));
    let currency_repo = Arc::new(SqlCurrencyRepository::new(pool));

    let registered = currency_repo.list().await?.len();
    tracing::info!(currencies = registered, "currency registry loaded");

    let mut registry = MethodRegistry::new();
    registry.register(Arc::new(PaypalMethod::new(
        transaction_repo,
        currency_repo,
        gateway_repo.clone(),
        config.import.page_size,
    )));

    let accounts = gateway_repo.list_active().await?;
    if accounts.is_empty() {
        tracing::info!("no active gateway accounts, nothing to import");
        return Ok(());
    }

    for account in accounts {
        let method = match registry.get(&account.method) {
            Ok(method) => method,
            Err(_) => {
                tracing::warn!(
                    gateway = %account.name,
                    method = %account.method,
                    "skipping gateway with unregistered method"
                );
                continue;
            }
        };

        let summary = method
            .import_transactions(&account)
            .await
            .map_err(|e: AppError| {
                tracing::error!(
                    gateway = %account.name,
                    kind = %e.kind(),
                    error = %e,
                    "import failed"
                );
                e
            })?;

        tracing::info!(
            gateway = %account.name,
            fetched = summary.fetched,
            skipped = summary.skipped,
            imported = summary.imported,
            "gateway import finished"
        );
    }

    Ok(())
}
