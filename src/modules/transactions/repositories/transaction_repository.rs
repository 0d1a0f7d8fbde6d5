use crate::core::Result;
use crate::modules::transactions::models::LedgerTransaction;
use async_trait::async_trait;
use sqlx::{MySql, MySqlPool, QueryBuilder};
use std::collections::HashSet;

/// Ledger transaction storage seam consumed by the importer
///
/// Deduplication is a pre-create existence check, not a storage constraint;
/// two concurrent importers can still both pass it.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Of the given external references, return the subset already recorded
    /// for this gateway
    async fn existing_references(
        &self,
        gateway_account_id: &str,
        references: &[String],
    ) -> Result<HashSet<String>>;

    /// Insert all records in one storage call, returning the created count
    async fn create_batch(&self, transactions: &[LedgerTransaction]) -> Result<u64>;
}

/// Repository for ledger transaction persistence
#[derive(Clone)]
pub struct SqlTransactionRepository {
    pool: MySqlPool,
}

impl SqlTransactionRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionStore for SqlTransactionRepository {
    async fn existing_references(
        &self,
        gateway_account_id: &str,
        references: &[String],
    ) -> Result<HashSet<String>> {
        if references.is_empty() {
            return Ok(HashSet::new());
        }

        let mut query = QueryBuilder::<MySql>::new(
            "SELECT external_ref FROM ledger_transactions WHERE gateway_account_id = ",
        );
        query.push_bind(gateway_account_id);
        query.push(" AND external_ref IN (");
        let mut refs = query.separated(", ");
        for reference in references {
            refs.push_bind(reference);
        }
        query.push(")");

        let rows: Vec<(String,)> = query.build_query_as().fetch_all(&self.pool).await?;

        Ok(rows.into_iter().map(|(reference,)| reference).collect())
    }

    async fn create_batch(&self, transactions: &[LedgerTransaction]) -> Result<u64> {
        if transactions.is_empty() {
            return Ok(0);
        }

        let mut query = QueryBuilder::<MySql>::new(
            "INSERT INTO ledger_transactions (id, gateway_account_id, external_ref, \
             description, gateway_reference, authorization_code, transaction_date, \
             amount, currency_id, status, log) ",
        );
        query.push_values(transactions, |mut row, tx| {
            row.push_bind(&tx.id)
                .push_bind(&tx.gateway_account_id)
                .push_bind(&tx.external_ref)
                .push_bind(&tx.description)
                .push_bind(&tx.gateway_reference)
                .push_bind(&tx.authorization_code)
                .push_bind(tx.transaction_date)
                .push_bind(tx.amount)
                .push_bind(&tx.currency_id)
                .push_bind(tx.status)
                .push_bind(&tx.log);
        });

        let result = query.build().execute(&self.pool).await?;

        Ok(result.rows_affected())
    }
}
