use thiserror::Error;

/// Main error type for the advisory dashboard
#[derive(Error, Debug)]
pub enum AgriError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    // Persistence errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    // Network errors
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Weather API error: {0}")]
    WeatherApi(String),

    // Text completion service errors
    #[error("Text service error: {0}")]
    TextService(String),

    // Data errors
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid data: {0}")]
    Data(String),

    // Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Generic errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AgriError {
    /// Failure category used in agent log lines
    pub fn category(&self) -> &'static str {
        match self {
            AgriError::Http(_) | AgriError::WeatherApi(_) => "network",
            AgriError::TextService(_) => "text-service",
            AgriError::Database(_) => "persistence",
            AgriError::Json(_) | AgriError::Csv(_) | AgriError::Data(_) => "data",
            AgriError::Config(_) | AgriError::Validation(_) => "config",
            AgriError::Io(_) | AgriError::Internal(_) | AgriError::Other(_) => "internal",
        }
    }
}

/// Result type alias for AgriError
pub type Result<T> = std::result::Result<T, AgriError>;
