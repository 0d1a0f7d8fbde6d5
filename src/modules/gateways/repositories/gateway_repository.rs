use crate::core::Result;
use crate::modules::gateways::models::{GatewayAccount, PaypalGateway};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::MySqlPool;

/// Gateway storage seam consumed by the importer and the runner
#[async_trait]
pub trait GatewayStore: Send + Sync {
    /// List active gateway accounts, all methods
    async fn list_active(&self) -> Result<Vec<GatewayAccount>>;

    /// Load the PayPal settings composed over an account, if any
    async fn find_paypal(&self, account_id: &str) -> Result<Option<PaypalGateway>>;

    /// Move the import window start to `from` and clear the upper bound
    ///
    /// Committed on its own, before the remote fetch. A fetch or create
    /// failure afterwards leaves the skipped interval unimported; the next
    /// run starts from `from`.
    async fn advance_import_window(&self, account_id: &str, from: DateTime<Utc>) -> Result<()>;
}

/// Gateway repository for database operations
#[derive(Clone)]
pub struct SqlGatewayRepository {
    pool: MySqlPool,
}

impl SqlGatewayRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GatewayStore for SqlGatewayRepository {
    async fn list_active(&self) -> Result<Vec<GatewayAccount>> {
        let accounts = sqlx::query_as::<_, GatewayAccount>(
            r#"
            SELECT id, name, method, environment, is_active, created_at, updated_at
            FROM gateway_accounts
            WHERE is_active = TRUE
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(accounts)
    }

    async fn find_paypal(&self, account_id: &str) -> Result<Option<PaypalGateway>> {
        let gateway = sqlx::query_as::<_, PaypalGateway>(
            r#"
            SELECT a.id, a.name, a.method, a.environment, a.is_active,
                   a.created_at, a.updated_at,
                   p.email, p.client_id, p.client_secret,
                   p.from_transactions, p.to_transactions
            FROM gateway_accounts a
            JOIN paypal_gateways p ON p.account_id = a.id
            WHERE a.id = ?
            "#,
        )
        .bind(account_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(gateway)
    }

    async fn advance_import_window(&self, account_id: &str, from: DateTime<Utc>) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE paypal_gateways
            SET from_transactions = ?, to_transactions = NULL
            WHERE account_id = ?
            "#,
        )
        .bind(from)
        .bind(account_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
