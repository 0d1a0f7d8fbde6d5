use std::fmt;

/// Application-wide Result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Main application error type
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Validation errors for business rules
    #[error("Validation error: {0}")]
    Validation(String),

    /// Database operation errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Payment gateway errors
    #[error("Gateway error: {0}")]
    Gateway(String),

    /// A payment references a currency code with no registered currency
    #[error("No currency registered for code '{0}'")]
    CurrencyNotFound(String),

    /// A remote payment state outside the mapping table
    #[error("Unmapped payment state '{0}'")]
    UnmappedState(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

// Helper functions for common error scenarios
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        AppError::NotFound(resource.into())
    }

    pub fn gateway(msg: impl Into<String>) -> Self {
        AppError::Gateway(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        AppError::Configuration(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Validation(_) => ErrorKind::Validation,
            AppError::Database(_) => ErrorKind::Database,
            AppError::Gateway(_) => ErrorKind::Gateway,
            AppError::CurrencyNotFound(_) => ErrorKind::Lookup,
            AppError::UnmappedState(_) => ErrorKind::Lookup,
            AppError::NotFound(_) => ErrorKind::Lookup,
            AppError::Configuration(_) => ErrorKind::Configuration,
            AppError::HttpClient(_) => ErrorKind::Gateway,
            AppError::Json(_) => ErrorKind::Validation,
            AppError::Internal(_) => ErrorKind::Internal,
        }
    }
}

/// Coarse error classification used in import run logs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Database,
    Gateway,
    Lookup,
    Configuration,
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Validation => write!(f, "validation"),
            ErrorKind::Database => write!(f, "database"),
            ErrorKind::Gateway => write!(f, "gateway"),
            ErrorKind::Lookup => write!(f, "lookup"),
            ErrorKind::Configuration => write!(f, "configuration"),
            ErrorKind::Internal => write!(f, "internal"),
        }
    }
}
