//! # figaro-rs
//!
//! Client for an ads Graph API: batched, paginated and rate-limited object
//! fetching, plus daily insight reports.
//!
//! ## Features
//!
//! - **Grouped fetching**: one batch call per 50 parents, every cursor chain walked
//! - **Shared rate limiting**: at most N calls per window across all clones of a limiter
//! - **Throttle recovery**: one cooldown and one retry on provider throttling
//! - **Typed objects**: ids, timestamps and numeric fields coerced per object kind
//! - **Reports**: per-parent insights projected onto caller-chosen columns
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use figaro_rs::{AdsClient, Config, DateRange, InsightsReporter};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/figaro.yaml").await?;
//!     figaro_rs::init_logging(&config.logging)?;
//!
//!     let client = AdsClient::new(&config)?;
//!     let campaigns = client.get_campaigns().await?;
//!     let ad_sets = client.get_ad_sets(&campaigns).await?;
//!     println!("{} ad sets, {} failed parents", ad_sets.len(), ad_sets.failures.len());
//!
//!     let range = DateRange::from_datetimes(
//!         chrono::Utc::now() - chrono::Duration::days(2),
//!         chrono::Utc::now(),
//!     )?;
//!     let report = InsightsReporter::new(client)
//!         .campaign_insights_report(range, Some(campaigns.as_slice()), &["campaign_id", "spend"])
//!         .await?;
//!     println!("{} rows", report.len());
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod sdk;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use core::batch::{
    BatchEntry, BatchPaginator, BatchResult, FetchStats, GroupRequest, GroupedFetch, ObjectKind,
    PageCursor, ParsedObject, RequestFailure,
};
pub use core::providers::GraphTransport;
pub use core::rate_limiter::{RateLimitResult, RateLimiter, RateLimiterStats};
pub use core::reporting::{DateRange, InsightsReporter, ReportTable};
pub use core::traits::BatchTransport;
pub use sdk::AdsClient;
pub use utils::error::{FetchError, Result};
pub use utils::logging::init_logging;

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
