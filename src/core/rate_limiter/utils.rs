//! Utility functions for rate limiter

use super::limiter::RateLimiter;
use super::types::RateLimitResult;
use crate::config::models::rate_limit::RateLimitStrategy;
use std::time::Duration;
use tokio::time::Instant;

impl RateLimiter {
    /// Current window status without recording anything
    pub fn status(&self) -> RateLimitResult {
        if !self.config.enabled {
            return RateLimitResult::unlimited(self.config.max_calls);
        }

        let now = Instant::now();
        let mut window = self.window.lock();
        match self.config.strategy {
            RateLimitStrategy::SlidingWindow => {
                self.check_sliding_window_impl(&mut window, 1, now, false)
            }
            RateLimitStrategy::FixedWindow => {
                self.check_fixed_window_impl(&mut window, 1, now, false)
            }
        }
    }

    /// Check if rate limiting is enabled
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Get the configured limit
    pub fn limit(&self) -> u32 {
        self.config.max_calls
    }

    /// Get the window length
    pub fn period(&self) -> Duration {
        self.config.period()
    }

    /// Get the sleep taken before retrying a throttled call
    pub fn cooldown(&self) -> Duration {
        self.config.cooldown()
    }
}
