//! Rate limiter types and data structures

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::time::Instant;

/// Rate limit result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitResult {
    /// Whether the slots were granted
    pub allowed: bool,
    /// Slots in use in the current window, including any just recorded
    pub current_count: u32,
    /// Maximum slots per window
    pub limit: u32,
    /// Slots still available in the window
    pub remaining: u32,
    /// Time until the oldest slot in the window frees up
    pub reset_after: Duration,
    /// How long the caller has to wait before retrying (only set when not allowed)
    pub retry_after: Option<Duration>,
}

impl RateLimitResult {
    pub(super) fn unlimited(limit: u32) -> Self {
        Self {
            allowed: true,
            current_count: 0,
            limit,
            remaining: limit,
            reset_after: Duration::ZERO,
            retry_after: None,
        }
    }
}

/// Shared window state
#[derive(Debug)]
pub(super) struct RateWindow {
    /// Call instants for the sliding window, oldest first
    pub(super) timestamps: VecDeque<Instant>,
    /// Fixed window: calls made since `window_start`
    pub(super) call_count: u32,
    /// Fixed window: when the current window opened
    pub(super) window_start: Instant,
}

impl RateWindow {
    pub(super) fn new() -> Self {
        Self {
            timestamps: VecDeque::new(),
            call_count: 0,
            window_start: Instant::now(),
        }
    }
}

#[derive(Debug, Default)]
pub(super) struct Counters {
    pub(super) acquisitions: AtomicU64,
    pub(super) waits: AtomicU64,
    pub(super) cooldowns: AtomicU64,
}

impl Counters {
    pub(super) fn bump(counter: &AtomicU64, by: u64) {
        counter.fetch_add(by, Ordering::Relaxed);
    }

    pub(super) fn snapshot(&self) -> RateLimiterStats {
        RateLimiterStats {
            acquisitions: self.acquisitions.load(Ordering::Relaxed),
            waits: self.waits.load(Ordering::Relaxed),
            cooldowns: self.cooldowns.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time limiter statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateLimiterStats {
    /// Slots granted
    pub acquisitions: u64,
    /// Times a caller was suspended waiting for capacity
    pub waits: u64,
    /// Cooldown sleeps after a throttling error
    pub cooldowns: u64,
}
