use crate::core::{AppError, Result};
use crate::modules::gateways::models::GatewayAccount;
use crate::modules::transactions::services::ImportSummary;
use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

/// One configuration field a payment method asks the operator to fill in
///
/// Fields belong to the method that declares them, so a host form only
/// shows them when that method is selected.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ConfigField {
    pub key: &'static str,
    pub label: &'static str,
    pub required: bool,
    /// Masked in forms and never logged
    pub secret: bool,
}

/// Capability interface implemented per payment-method variant
#[async_trait]
pub trait PaymentMethod: Send + Sync {
    /// Stable method key, matched against `GatewayAccount::method`
    fn name(&self) -> &str;

    /// Display name for method selection
    fn label(&self) -> &str;

    /// Configuration fields this method adds to the gateway form
    fn config_fields(&self) -> Vec<ConfigField>;

    /// Import the account's remote payments into the ledger
    async fn import_transactions(&self, account: &GatewayAccount) -> Result<ImportSummary>;
}

/// Selectable payment method entry
#[derive(Debug, Clone, Serialize)]
pub struct MethodInfo {
    pub name: String,
    pub label: String,
}

/// Registry of payment methods available to gateway accounts
#[derive(Default)]
pub struct MethodRegistry {
    methods: HashMap<String, Arc<dyn PaymentMethod>>,
}

impl MethodRegistry {
    pub fn new() -> Self {
        Self {
            methods: HashMap::new(),
        }
    }

    /// Register a method under its own name
    pub fn register(&mut self, method: Arc<dyn PaymentMethod>) {
        self.methods.insert(method.name().to_string(), method);
    }

    /// Look up a method by name
    pub fn get(&self, name: &str) -> Result<Arc<dyn PaymentMethod>> {
        self.methods
            .get(name)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Payment method '{}' not registered", name)))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    /// List registered methods for method selection
    pub fn methods(&self) -> Vec<MethodInfo> {
        let mut entries: Vec<MethodInfo> = self
            .methods
            .values()
            .map(|method| MethodInfo {
                name: method.name().to_string(),
                label: method.label().to_string(),
            })
            .collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        entries
    }
}
