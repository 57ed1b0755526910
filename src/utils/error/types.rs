//! Error types for the client

use thiserror::Error;

/// Result type alias for the client
pub type Result<T> = std::result::Result<T, FetchError>;

/// Main error type for the client
#[derive(Error, Debug)]
pub enum FetchError {
    /// The provider rejected the call for exceeding its call rate
    #[error("Throttled by provider: {message}")]
    Throttled {
        /// Provider error code, when the provider sent one
        code: Option<i64>,
        /// Provider message
        message: String,
    },

    /// Non-retryable request failure carrying the provider payload
    #[error("Request error: {message}")]
    Request {
        /// HTTP status of the failed call or batch sub-response
        status: Option<u16>,
        /// Provider error code
        code: Option<i64>,
        /// Provider message
        message: String,
        /// Raw provider error body
        payload: Option<serde_json::Value>,
    },

    /// Malformed page content
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network errors
    #[error("Network error: {0}")]
    Network(String),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
