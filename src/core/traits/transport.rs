//! Provider transport trait

use crate::core::batch::{BatchResult, GroupRequest, PageCursor};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Vendor-facing collaborator of the batch paginator.
///
/// Implementations classify provider failures: throttling becomes
/// [`FetchError::Throttled`](crate::utils::error::FetchError::Throttled),
/// everything else a request, parse or network error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BatchTransport: Send + Sync {
    /// Submit one grouped call; entries carry the submitted index of each request
    async fn submit_batch(&self, requests: &[GroupRequest]) -> Result<BatchResult>;

    /// Fetch one page from an absolute URL
    async fn fetch_page(&self, url: &str, params: &[(String, String)]) -> Result<PageCursor>;

    /// Absolute URL of a request's first page, without query parameters
    fn resolve_url(&self, request: &GroupRequest) -> String;
}
