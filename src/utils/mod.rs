//! Utility modules
//!
//! - **error**: error type and `Result` alias
//! - **logging**: tracing subscriber setup

pub mod error;
pub mod logging;

pub use error::{FetchError, Result};
pub use logging::init_logging;
