use thiserror::Error;

/// Main error type for the boulevard runtime
#[derive(Error, Debug)]
pub enum BoulevardError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    // Database errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    // Network errors
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    // Serialization errors
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // Task validation errors (unsupported task type, missing required field)
    #[error("Validation failed: {0}")]
    Validation(String),

    // Project template errors
    #[error("Template error: {0}")]
    Template(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Generic errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias for BoulevardError
pub type Result<T> = std::result::Result<T, BoulevardError>;
