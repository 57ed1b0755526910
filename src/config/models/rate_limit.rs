//! Rate limiting configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Rate limiting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Enable call-rate throttling (the cooldown retry applies either way)
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Calls allowed per window
    #[serde(default = "default_max_calls")]
    pub max_calls: u32,
    /// Window length in seconds
    #[serde(default = "default_period_secs")]
    pub period_secs: u64,
    /// Sleep before the single retry of a throttled call
    #[serde(default = "default_cooldown_secs")]
    pub cooldown_secs: u64,
    /// Window accounting strategy
    #[serde(default)]
    pub strategy: RateLimitStrategy,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_calls: default_max_calls(),
            period_secs: default_period_secs(),
            cooldown_secs: default_cooldown_secs(),
            strategy: RateLimitStrategy::default(),
        }
    }
}

impl RateLimitConfig {
    pub fn period(&self) -> Duration {
        Duration::from_secs(self.period_secs)
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(self.cooldown_secs)
    }
}

/// Rate limiting strategy
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RateLimitStrategy {
    /// Bound holds for every window of `period_secs`
    #[default]
    SlidingWindow,
    /// Counter reset when `period_secs` has elapsed since the window opened
    FixedWindow,
}
