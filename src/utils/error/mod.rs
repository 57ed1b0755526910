//! Error handling for the client
//!
//! A single error enum covers the three failure classes of a fetch
//! (throttled, request, parse) plus the ambient ones (config, IO, HTTP).

mod helpers;
mod types;

pub use types::{FetchError, Result};
