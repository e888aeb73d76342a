//! Configuration loading and management

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Paging defaults for generated `skip`/`limit` arguments
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PagingConfig {
    /// Default value of the `skip` argument
    #[serde(default)]
    pub skip: i64,

    /// Default value of the `limit` argument
    #[serde(default = "default_limit")]
    pub limit: i64,

    /// Upper bound applied to `limit` before it reaches a loader
    #[serde(default)]
    pub max_limit: Option<i64>,
}

fn default_limit() -> i64 {
    10
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: default_limit(),
            max_limit: None,
        }
    }
}

impl PagingConfig {
    /// Apply the configured `max_limit` to a requested limit
    ///
    /// Anything else, negative values included, is left for the loader to interpret.
    pub fn cap_limit(&self, limit: i64) -> i64 {
        match self.max_limit {
            Some(max) if limit > max => max,
            _ => limit,
        }
    }

    /// These defaults with explicit `skip`/`limit` values laid over them
    pub fn with_overrides(&self, skip: Option<i64>, limit: Option<i64>) -> Self {
        Self {
            skip: skip.unwrap_or(self.skip),
            limit: limit.unwrap_or(self.limit),
            max_limit: self.max_limit,
        }
    }
}

/// Default field descriptions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DescriptionConfig {
    /// Description of single-item lookups and scalar references
    #[serde(default = "default_by_id")]
    pub by_id: String,

    /// Description of paged fields
    #[serde(default = "default_paged")]
    pub paged: String,
}

fn default_by_id() -> String {
    "Retrieves item by its id".to_string()
}

fn default_paged() -> String {
    "Retrieves items paged".to_string()
}

impl Default for DescriptionConfig {
    fn default() -> Self {
        Self {
            by_id: default_by_id(),
            paged: default_paged(),
        }
    }
}

/// Complete configuration for the resolver factories
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ResolverConfig {
    #[serde(default)]
    pub paging: PagingConfig,

    #[serde(default)]
    pub descriptions: DescriptionConfig,
}

impl ResolverConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }
}
