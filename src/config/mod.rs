use crate::core::{AppError, Result};
use serde::Deserialize;
use std::env;

pub mod database;

pub use database::DatabaseConfig;

/// PayPal listing pages carry at most 20 payments
const MAX_PAGE_SIZE: u32 = 20;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub import: ImportConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImportConfig {
    pub page_size: u32,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            },
            database: DatabaseConfig::from_env()?,
            import: ImportConfig {
                page_size: env::var("PAYPAL_PAGE_SIZE")
                    .unwrap_or_else(|_| MAX_PAGE_SIZE.to_string())
                    .parse()
                    .map_err(|_| {
                        AppError::Configuration("Invalid PAYPAL_PAGE_SIZE".to_string())
                    })?,
            },
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.import.page_size == 0 || self.import.page_size > MAX_PAGE_SIZE {
            return Err(AppError::Configuration(format!(
                "PAYPAL_PAGE_SIZE must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }

        if self.database.max_connections < self.database.min_connections {
            return Err(AppError::Configuration(
                "DATABASE_MAX_CONNECTIONS must be >= DATABASE_MIN_CONNECTIONS".to_string(),
            ));
        }

        Ok(())
    }
}
