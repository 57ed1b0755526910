//! Configuration management
//!
//! This module handles loading, validation, and management of client configuration.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{FetchError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

/// Prefix shared by every environment variable the client reads
pub const ENV_PREFIX: &str = "FIGARO_";

/// Main configuration struct
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub batch: BatchConfig,
    #[serde(default)]
    pub fields: FieldsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| FetchError::Config(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_yaml(&content)?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Parse and validate a YAML document
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| FetchError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables (and `.env` when present)
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        if let Ok(path) = dotenvy::dotenv() {
            debug!("Loaded environment from {:?}", path);
        }

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(&format!("{}{}", ENV_PREFIX, name)).filter(|v| !v.trim().is_empty())
        };

        let mut config = Self::default();

        if let Some(token) = var("ACCESS_TOKEN") {
            config.api.access_token = Some(token);
        }
        if let Some(base_url) = var("API_BASE") {
            config.api.base_url = base_url;
        }
        if let Some(version) = var("API_VERSION") {
            config.api.api_version = version;
        }
        if let Some(account_id) = var("ACCOUNT_ID") {
            config.api.account_id = Some(parse_var("ACCOUNT_ID", &account_id)?);
        }
        if let Some(timeout) = var("TIMEOUT") {
            config.api.timeout = parse_var("TIMEOUT", &timeout)?;
        }
        if let Some(max_calls) = var("RATE_LIMIT_MAX_CALLS") {
            config.rate_limit.max_calls = parse_var("RATE_LIMIT_MAX_CALLS", &max_calls)?;
        }
        if let Some(period) = var("RATE_LIMIT_PERIOD_SECS") {
            config.rate_limit.period_secs = parse_var("RATE_LIMIT_PERIOD_SECS", &period)?;
        }
        if let Some(cooldown) = var("RATE_LIMIT_COOLDOWN_SECS") {
            config.rate_limit.cooldown_secs = parse_var("RATE_LIMIT_COOLDOWN_SECS", &cooldown)?;
        }
        if let Some(chunk_size) = var("BATCH_CHUNK_SIZE") {
            config.batch.chunk_size = parse_var("BATCH_CHUNK_SIZE", &chunk_size)?;
        }
        if let Some(level) = var("LOG_LEVEL") {
            config.logging.level = level;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.api
            .validate()
            .map_err(|e| FetchError::Config(format!("API config error: {}", e)))?;

        self.rate_limit
            .validate()
            .map_err(|e| FetchError::Config(format!("Rate limit config error: {}", e)))?;

        self.batch
            .validate()
            .map_err(|e| FetchError::Config(format!("Batch config error: {}", e)))?;

        self.logging
            .validate()
            .map_err(|e| FetchError::Config(format!("Logging config error: {}", e)))?;

        if self.rate_limit.enabled
            && self.batch.count_requests_individually
            && self.batch.chunk_size > self.rate_limit.max_calls as usize
        {
            return Err(FetchError::Config(format!(
                "Batch config error: chunk_size {} costs more than max_calls {} allows",
                self.batch.chunk_size, self.rate_limit.max_calls
            )));
        }

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| FetchError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}

fn parse_var<T>(name: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse::<T>().map_err(|e| {
        FetchError::Config(format!("Invalid {}{} '{}': {}", ENV_PREFIX, name, value, e))
    })
}
