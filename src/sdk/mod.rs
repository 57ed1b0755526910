//! Ads API SDK
//!
//! Domain-level access to an ad account built on the batch paginator.

pub mod client;

// Re-exports for convenience
pub use client::{AdsClient, THUMBNAIL_SIZE, object_ids};
