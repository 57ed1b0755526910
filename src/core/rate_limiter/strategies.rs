//! Rate limiting strategy implementations

use super::limiter::RateLimiter;
use super::types::{RateLimitResult, RateWindow};
use std::time::Duration;
use tokio::time::Instant;

impl RateLimiter {
    /// Sliding window: at most `max_calls` instants inside any span of `period`.
    /// If `record` is true, atomically records `n` calls when they fit.
    pub(super) fn check_sliding_window_impl(
        &self,
        window: &mut RateWindow,
        n: u32,
        now: Instant,
        record: bool,
    ) -> RateLimitResult {
        let limit = self.config.max_calls;
        let period = self.config.period();

        while let Some(&oldest) = window.timestamps.front() {
            if oldest + period <= now {
                window.timestamps.pop_front();
            } else {
                break;
            }
        }

        let in_window = window.timestamps.len() as u32;
        let allowed = in_window + n <= limit;

        let retry_after = if allowed {
            if record {
                window.timestamps.extend(std::iter::repeat_n(now, n as usize));
            }
            None
        } else {
            // Oldest instants that must age out before `n` more fit
            let must_expire = (in_window + n - limit) as usize;
            window
                .timestamps
                .get(must_expire - 1)
                .map(|&t| (t + period).saturating_duration_since(now))
                .or(Some(period))
        };

        let current_count = window.timestamps.len() as u32;
        let reset_after = window
            .timestamps
            .front()
            .map(|&t| (t + period).saturating_duration_since(now))
            .unwrap_or(Duration::ZERO);

        RateLimitResult {
            allowed,
            current_count,
            limit,
            remaining: limit.saturating_sub(current_count),
            reset_after,
            retry_after,
        }
    }

    /// Fixed window: a counter reset once `period` has elapsed since the window opened.
    /// If `record` is true, atomically records `n` calls when they fit.
    pub(super) fn check_fixed_window_impl(
        &self,
        window: &mut RateWindow,
        n: u32,
        now: Instant,
        record: bool,
    ) -> RateLimitResult {
        let limit = self.config.max_calls;
        let period = self.config.period();

        if window.call_count == 0 || now >= window.window_start + period {
            window.call_count = 0;
            window.window_start = now;
        }

        let allowed = window.call_count + n <= limit;
        let reset_after = (window.window_start + period).saturating_duration_since(now);

        let retry_after = if allowed {
            if record {
                window.call_count += n;
            }
            None
        } else {
            Some(reset_after)
        };

        RateLimitResult {
            allowed,
            current_count: window.call_count,
            limit,
            remaining: limit.saturating_sub(window.call_count),
            reset_after,
            retry_after,
        }
    }
}
