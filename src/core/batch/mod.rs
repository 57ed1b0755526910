//! Grouped, paginated fetching
//!
//! Parents are chunked into batch calls; every sub-response's cursor chain is
//! walked through the shared rate limiter and parsed into typed objects.

mod paginator;
mod schema;
mod types;


// Re-export all public types
pub use paginator::BatchPaginator;
pub use schema::ObjectKind;
pub use types::{
    BatchEntry, BatchResult, FetchStats, GroupRequest, GroupedFetch, PageCursor, ParsedObject,
    RequestFailure,
};
