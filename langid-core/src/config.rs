//! Identifier configuration loaded from TOML

use crate::error::{LangIdError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings applied when constructing a [`LanguageIdentifier`](crate::LanguageIdentifier)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IdentifierConfig {
    /// Report softmax probabilities instead of raw log-scores
    pub norm_probs: bool,
    /// Initial language subset; empty means every language
    pub languages: Vec<String>,
}

impl Default for IdentifierConfig {
    fn default() -> Self {
        Self {
            norm_probs: true,
            languages: Vec::new(),
        }
    }
}

impl IdentifierConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).map_err(|e| LangIdError::Config(format!("Failed to parse TOML: {e}")))
    }

    /// Read and parse a TOML configuration file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            LangIdError::Config(format!("Failed to read file '{}': {}", path.display(), e))
        })?;
        toml::from_str(&content).map_err(|e| {
            LangIdError::Config(format!("Failed to parse TOML from '{}': {}", path.display(), e))
        })
    }
}
