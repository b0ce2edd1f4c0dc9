//! Configuration module
//!
//! ```toml
//! model = "models/langid.bin"
//!
//! [identifier]
//! norm_probs = true
//! languages = ["en", "de", "fr"]
//!
//! [output]
//! format = "json"
//! top = 3
//! ```

use crate::error::CliError;
use crate::output::OutputFormat;
use anyhow::{Context, Result};
use langid_core::IdentifierConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// CLI configuration structure
#[derive(Debug, Deserialize, Serialize, Default)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Model file; relative paths are taken from the config file's directory
    #[serde(default)]
    pub model: Option<PathBuf>,

    /// Identifier settings
    #[serde(default)]
    pub identifier: IdentifierConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Output-related configuration
#[derive(Debug, Deserialize, Serialize, Default)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Default output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Default number of ranked languages to print
    #[serde(default)]
    pub top: Option<usize>,
}

impl CliConfig {
    /// Load a configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let mut config: CliConfig = toml::from_str(&content).map_err(|e| {
            CliError::ConfigError(format!("Failed to parse TOML from '{}': {}", path.display(), e))
        })?;

        if let (Some(model), Some(dir)) = (config.model.as_mut(), path.parent()) {
            if model.is_relative() {
                *model = dir.join(&*model);
            }
        }

        Ok(config)
    }
}
