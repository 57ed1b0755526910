//! Graph API provider
//!
//! HTTP implementation of [`BatchTransport`](crate::core::traits::BatchTransport).

mod client;
pub mod error;

pub use client::GraphTransport;
