//! Helper functions for creating and classifying errors

use super::types::FetchError;

impl FetchError {
    pub fn throttled<S: Into<String>>(code: Option<i64>, message: S) -> Self {
        Self::Throttled {
            code,
            message: message.into(),
        }
    }

    pub fn request<S: Into<String>>(status: Option<u16>, message: S) -> Self {
        Self::Request {
            status,
            code: None,
            message: message.into(),
            payload: None,
        }
    }

    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse(message.into())
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network(message.into())
    }

    /// True for the provider's throttling signal, the only error the
    /// rate limiter retries.
    pub fn is_throttled(&self) -> bool {
        matches!(self, Self::Throttled { .. })
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Throttled { .. } | Self::Network(_) => true,
            Self::HttpClient(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    /// Short machine-readable name, used as a structured log field
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Throttled { .. } => "throttled",
            Self::Request { .. } => "request_error",
            Self::Parse(_) => "parse_error",
            Self::Config(_) => "config_error",
            Self::Network(_) => "network_error",
            Self::HttpClient(_) => "http_client_error",
            Self::Serialization(_) => "serialization_error",
            Self::Yaml(_) => "yaml_error",
            Self::Io(_) => "io_error",
        }
    }

    /// Provider error code for throttled and request errors
    pub fn provider_code(&self) -> Option<i64> {
        match self {
            Self::Throttled { code, .. } | Self::Request { code, .. } => *code,
            _ => None,
        }
    }
}
