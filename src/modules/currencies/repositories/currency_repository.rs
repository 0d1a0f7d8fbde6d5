use crate::core::Result;
use crate::modules::currencies::models::Currency;
use async_trait::async_trait;
use sqlx::MySqlPool;

/// Currency lookup seam consumed by the importer
///
/// Injected as a constructor parameter so callers never resolve currencies
/// through shared global state.
#[async_trait]
pub trait CurrencyStore: Send + Sync {
    /// Resolve a registered currency by exact code match
    async fn find_by_code(&self, code: &str) -> Result<Option<Currency>>;
}

/// Currency repository for database operations
#[derive(Clone)]
pub struct SqlCurrencyRepository {
    pool: MySqlPool,
}

impl SqlCurrencyRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// List all registered currencies
    pub async fn list(&self) -> Result<Vec<Currency>> {
        let currencies = sqlx::query_as::<_, Currency>(
            r#"
            SELECT id, code, name, digits
            FROM currencies
            ORDER BY code
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(currencies)
    }
}

#[async_trait]
impl CurrencyStore for SqlCurrencyRepository {
    async fn find_by_code(&self, code: &str) -> Result<Option<Currency>> {
        let currency = sqlx::query_as::<_, Currency>(
            r#"
            SELECT id, code, name, digits
            FROM currencies
            WHERE code = ?
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(currency)
    }
}
