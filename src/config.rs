//! Configuration file support for depure.
//!
//! Provides YAML-based configuration through `depure.config.yml` files,
//! including data structures, file loading, and validation. Command-line
//! flags always override config file values.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::shared::Result;

const CONFIG_FILENAME: &str = "depure.config.yml";

/// Upper bound on transitive BFS depth. Anything deeper balloons
/// registry traffic without adding actionable information.
pub const MAX_DEPTH_LIMIT: usize = 5;

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub oracle: Option<OracleConfig>,
    pub registry: Option<RegistryConfig>,
    pub max_depth: Option<usize>,
    pub concurrency: Option<usize>,
    pub cache_ttl_secs: Option<u64>,
    pub exclude: Option<Vec<String>>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Oracle (LLM) connection settings.
#[derive(Debug, Deserialize, Default)]
pub struct OracleConfig {
    pub model: Option<String>,
    pub endpoint: Option<String>,
    /// Name of the environment variable holding the API key. The key
    /// itself never lives in the config file.
    pub api_key_env: Option<String>,
}

/// Package registry connection settings.
#[derive(Debug, Deserialize, Default)]
pub struct RegistryConfig {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Load config from an explicit path. Returns an error if the file is
/// not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not
/// found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(max_depth) = config.max_depth {
        if max_depth > MAX_DEPTH_LIMIT {
            bail!(
                "Invalid config: max_depth must be at most {}.\n\n\
                 💡 Hint: Deep transitive expansion multiplies registry lookups; 2 is usually enough.",
                MAX_DEPTH_LIMIT
            );
        }
    }
    if config.concurrency == Some(0) {
        bail!(
            "Invalid config: concurrency must be at least 1.\n\n\
             💡 Hint: This bounds simultaneous registry requests; try 8."
        );
    }
    if let Some(registry) = &config.registry {
        if let Some(base_url) = &registry.base_url {
            if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
                bail!(
                    "Invalid config: registry.base_url must be an http(s) URL, got '{}'.",
                    base_url
                );
            }
        }
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}
