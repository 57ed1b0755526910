//! Section validators

use super::trait_def::Validate;
use crate::config::models::*;
use tracing::debug;

impl Validate for ApiConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating API configuration");

        let url = url::Url::parse(&self.base_url)
            .map_err(|e| format!("Invalid base_url '{}': {}", self.base_url, e))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(format!(
                "base_url must use http or https, got '{}'",
                url.scheme()
            ));
        }

        if self.api_version.trim_matches('/').is_empty() {
            return Err("api_version cannot be empty".to_string());
        }

        if self.timeout == 0 {
            return Err("API timeout must be greater than 0".to_string());
        }

        if let Some(token) = &self.access_token {
            if token.trim().is_empty() {
                return Err("access_token cannot be blank".to_string());
            }
        }

        Ok(())
    }
}

impl Validate for RateLimitConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating rate limit configuration");

        if self.max_calls == 0 {
            return Err("max_calls must be greater than 0".to_string());
        }

        if self.period_secs == 0 {
            return Err("period_secs must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl Validate for BatchConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating batch configuration");

        if self.chunk_size == 0 {
            return Err("chunk_size must be greater than 0".to_string());
        }

        if self.chunk_size > MAX_CHUNK_SIZE {
            return Err(format!(
                "chunk_size {} exceeds the provider batch limit of {}",
                self.chunk_size, MAX_CHUNK_SIZE
            ));
        }

        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.level.trim().is_empty() {
            return Err("log level cannot be empty".to_string());
        }

        tracing_subscriber::EnvFilter::try_new(&self.level)
            .map_err(|e| format!("Invalid log level '{}': {}", self.level, e))?;

        Ok(())
    }
}
