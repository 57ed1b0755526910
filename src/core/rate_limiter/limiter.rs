//! Core rate limiter implementation

use super::types::{Counters, RateLimitResult, RateLimiterStats, RateWindow};
use crate::config::models::rate_limit::{RateLimitConfig, RateLimitStrategy};
use crate::utils::error::{FetchError, Result};
use parking_lot::Mutex;
use std::future::Future;
use std::sync::Arc;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Call-rate limiter shared by every clone of the handle
#[derive(Debug, Clone)]
pub struct RateLimiter {
    /// Rate limit configuration
    pub(super) config: Arc<RateLimitConfig>,
    /// Window state, never locked across an await
    pub(super) window: Arc<Mutex<RateWindow>>,
    pub(super) counters: Arc<Counters>,
}

impl RateLimiter {
    /// Create a new rate limiter
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config: Arc::new(config),
            window: Arc::new(Mutex::new(RateWindow::new())),
            counters: Arc::new(Counters::default()),
        }
    }

    /// Create a sliding-window limiter with the default cooldown
    pub fn with_limits(max_calls: u32, period_secs: u64) -> Self {
        Self::new(RateLimitConfig {
            max_calls,
            period_secs,
            ..Default::default()
        })
    }

    /// Wait until one call fits in the window, then record it
    pub async fn acquire(&self) -> Result<()> {
        self.acquire_n(1).await
    }

    /// Wait until `n` calls fit in the window, then record them together
    pub async fn acquire_n(&self, n: u32) -> Result<()> {
        if n == 0 {
            return Ok(());
        }
        if !self.config.enabled {
            Counters::bump(&self.counters.acquisitions, n as u64);
            return Ok(());
        }
        if n > self.config.max_calls {
            return Err(FetchError::config(format!(
                "cannot acquire {} slots from a limiter allowing {} per window",
                n, self.config.max_calls
            )));
        }

        loop {
            let result = self.check_and_record(n);
            match result.retry_after {
                None => return Ok(()),
                Some(wait) => {
                    Counters::bump(&self.counters.waits, 1);
                    debug!(
                        "Rate limit reached ({}/{}), waiting {:?}",
                        result.current_count, result.limit, wait
                    );
                    tokio::time::sleep(wait).await;
                }
            }
        }
    }

    /// Record one call if it fits, without waiting
    pub fn try_acquire(&self) -> RateLimitResult {
        self.check_and_record(1)
    }

    /// Atomically check and record `n` slots
    pub(super) fn check_and_record(&self, n: u32) -> RateLimitResult {
        if !self.config.enabled {
            Counters::bump(&self.counters.acquisitions, n as u64);
            return RateLimitResult::unlimited(self.config.max_calls);
        }

        let now = Instant::now();
        let result = {
            let mut window = self.window.lock();
            match self.config.strategy {
                RateLimitStrategy::SlidingWindow => {
                    self.check_sliding_window_impl(&mut window, n, now, true)
                }
                RateLimitStrategy::FixedWindow => {
                    self.check_fixed_window_impl(&mut window, n, now, true)
                }
            }
        };

        if result.allowed {
            Counters::bump(&self.counters.acquisitions, n as u64);
        }
        result
    }

    /// Acquire a slot and run `operation`, retrying once after a cooldown if throttled
    pub async fn execute_with_retry<F, Fut, T>(&self, operation: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        self.execute_weighted(1, operation).await
    }

    /// Like [`execute_with_retry`](Self::execute_with_retry) but each attempt costs `cost` slots
    pub async fn execute_weighted<F, Fut, T>(&self, cost: u32, mut operation: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        self.acquire_n(cost).await?;

        match operation().await {
            Err(e) if e.is_throttled() => {
                self.cool_down(&e).await;
                self.acquire_n(cost).await?;
                operation().await
            }
            other => other,
        }
    }

    /// Sleep the configured cooldown after a throttling error
    pub async fn cool_down(&self, cause: &FetchError) {
        let cooldown = self.config.cooldown();
        warn!("Throttled by provider ({}), cooling down for {:?}", cause, cooldown);
        Counters::bump(&self.counters.cooldowns, 1);
        tokio::time::sleep(cooldown).await;
    }

    /// Snapshot of the limiter counters
    pub fn stats(&self) -> RateLimiterStats {
        self.counters.snapshot()
    }
}
