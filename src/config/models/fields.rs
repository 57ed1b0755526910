//! Per-object field lists

use serde::{Deserialize, Serialize};

/// Fields requested for each object type; an empty list leaves the choice to the provider
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldsConfig {
    #[serde(default)]
    pub account: Vec<String>,
    #[serde(default)]
    pub campaign: Vec<String>,
    #[serde(default)]
    pub ad_set: Vec<String>,
    #[serde(default)]
    pub ad: Vec<String>,
    #[serde(default)]
    pub ad_creative: Vec<String>,
    #[serde(default)]
    pub activity: Vec<String>,
}
