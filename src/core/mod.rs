//! Core functionality
//!
//! Rate limiting, grouped pagination, the provider transport and reporting.

pub mod batch;
pub mod providers;
pub mod rate_limiter;
pub mod reporting;
pub mod traits;
