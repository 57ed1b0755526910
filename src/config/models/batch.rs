//! Batch fetch configuration

use super::*;
use serde::{Deserialize, Serialize};

/// How per-request failures inside a grouped fetch are surfaced
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Keep going; failures are reported next to the objects
    #[default]
    Collect,
    /// Return the first per-request failure as an error
    FailFast,
}

/// Batch fetch configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Parents per batch submission
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    #[serde(default)]
    pub failure_policy: FailurePolicy,
    /// Charge a batch one limiter slot per sub-request instead of one in total
    #[serde(default)]
    pub count_requests_individually: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            failure_policy: FailurePolicy::default(),
            count_requests_individually: false,
        }
    }
}

impl BatchConfig {
    /// Set chunk size
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Set failure policy
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Charge batches per sub-request
    pub fn with_count_requests_individually(mut self, enabled: bool) -> Self {
        self.count_requests_individually = enabled;
        self
    }

    /// Limiter cost of submitting a chunk of `len` requests
    pub fn batch_cost(&self, len: usize) -> u32 {
        if self.count_requests_individually {
            len.max(1) as u32
        } else {
            1
        }
    }
}
