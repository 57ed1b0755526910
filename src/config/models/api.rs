//! Provider API configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Graph API connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API host, without version segment
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Version segment inserted after the host (e.g. `v3.3`)
    #[serde(default = "default_api_version")]
    pub api_version: String,
    /// Already-issued access token
    #[serde(default)]
    pub access_token: Option<String>,
    /// Ad account used by account-scoped calls
    #[serde(default)]
    pub account_id: Option<u64>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Provider error codes classified as throttling
    #[serde(default = "default_throttle_error_codes")]
    pub throttle_error_codes: Vec<i64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_version: default_api_version(),
            access_token: None,
            account_id: None,
            timeout: default_timeout(),
            throttle_error_codes: default_throttle_error_codes(),
        }
    }
}

impl ApiConfig {
    /// `{base_url}/{api_version}/` with exactly one slash between parts
    pub fn versioned_base(&self) -> String {
        format!(
            "{}/{}/",
            self.base_url.trim_end_matches('/'),
            self.api_version.trim_matches('/')
        )
    }

    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn is_throttle_code(&self, code: i64) -> bool {
        self.throttle_error_codes.contains(&code)
    }
}
