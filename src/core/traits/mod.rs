//! Core traits module
//!
//! Contains the abstract interface between the fetch core and the provider

pub mod transport;

pub use transport::*;
