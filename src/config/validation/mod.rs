//! Configuration validation
//!
//! - `trait_def`: Core Validate trait definition
//! - `config_validators`: per-section validators
//! - `tests`: Test suite for all validators

mod config_validators;
mod trait_def;

pub use trait_def::Validate;
