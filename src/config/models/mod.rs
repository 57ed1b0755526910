//! Configuration data models
//!
//! This module defines all configuration structures used by the client.

pub mod api;
pub mod batch;
pub mod fields;
pub mod logging;
pub mod rate_limit;

// Re-export all configuration types
pub use api::*;
pub use batch::*;
pub use fields::*;
pub use logging::*;
pub use rate_limit::*;

/// Default Graph API host
pub fn default_base_url() -> String {
    "https://graph.facebook.com".to_string()
}

/// Default Graph API version
pub fn default_api_version() -> String {
    "v3.3".to_string()
}

/// Default HTTP timeout in seconds
pub fn default_timeout() -> u64 {
    60
}

/// Provider error codes that signal throttling
pub fn default_throttle_error_codes() -> Vec<i64> {
    vec![
        4, 17, 32, 613, 80000, 80001, 80002, 80003, 80004, 80005, 80006, 80008, 80009, 80014,
    ]
}

pub fn default_max_calls() -> u32 {
    100
}

pub fn default_period_secs() -> u64 {
    10
}

pub fn default_cooldown_secs() -> u64 {
    90
}

/// Largest number of sub-requests the provider accepts in one batch
pub const MAX_CHUNK_SIZE: usize = 50;

pub fn default_chunk_size() -> usize {
    MAX_CHUNK_SIZE
}

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_true() -> bool {
    true
}
