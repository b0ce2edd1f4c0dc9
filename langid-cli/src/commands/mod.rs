//! CLI command implementations

use crate::config::CliConfig;
use crate::error::CliError;
use anyhow::Result;
use clap::{Args, Subcommand};
use langid_core::Model;
use std::path::{Path, PathBuf};

pub mod classify;
pub mod convert;
pub mod languages;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Identify the language of files or standard input
    Classify(classify::ClassifyArgs),

    /// List the languages a model knows
    Languages(languages::LanguagesArgs),

    /// Convert a model between the binary and source-literal forms
    Convert(convert::ConvertArgs),

    /// Check that a model file loads and report its dimensions
    Validate(validate::ValidateArgs),
}

impl Commands {
    /// Run the selected command
    pub fn execute(&self, quiet: bool) -> Result<()> {
        match self {
            Commands::Classify(args) => args.execute(quiet),
            Commands::Languages(args) => args.execute(),
            Commands::Convert(args) => args.execute(),
            Commands::Validate(args) => args.execute(),
        }
    }
}

/// Where the model comes from: an explicit path or a config file
#[derive(Debug, Clone, Default, Args)]
pub struct ModelArgs {
    /// Model file (binary or source-literal form)
    #[arg(short, long, value_name = "FILE", env = "LANGID_MODEL")]
    pub model: Option<PathBuf>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl ModelArgs {
    /// Load the configuration file, or defaults when none was given
    pub fn load_config(&self) -> Result<CliConfig> {
        match &self.config {
            Some(path) => CliConfig::from_file(path),
            None => Ok(CliConfig::default()),
        }
    }

    /// Resolve and load the model; `--model` wins over the config file
    pub fn load(&self) -> Result<(Model, CliConfig)> {
        let config = self.load_config()?;
        let path = self.model.as_ref().or(config.model.as_ref()).ok_or_else(|| {
            CliError::ConfigError("no model given; pass --model or set `model` in the config file".to_string())
        })?;

        let model = load_model_file(path)?;
        Ok((model, config))
    }
}

/// Load a model file, logging its dimensions
pub fn load_model_file(path: &Path) -> Result<Model> {
    let model = Model::from_path(path).map_err(|e| CliError::ModelError(format!("{}: {e}", path.display())))?;
    log::info!(
        "Loaded model {}: {} states, {} features, {} languages",
        path.display(),
        model.num_states(),
        model.num_feats(),
        model.num_langs()
    );
    Ok(model)
}
