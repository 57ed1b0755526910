//! Rate Limiting Implementation
//!
//! Bounds calls per time window across every clone of a [`RateLimiter`] and
//! absorbs a single provider throttling error with a cooldown and one retry.

mod limiter;
mod strategies;
mod types;
mod utils;


// Re-export public types
pub use limiter::RateLimiter;
pub use types::{RateLimitResult, RateLimiterStats};
