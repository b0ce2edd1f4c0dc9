//! Convert command implementation

use super::load_model_file;
use crate::error::CliError;
use anyhow::{Context, Result};
use clap::Args;
use langid_core::model::{encode_binary, encode_literal};
use std::fs;
use std::path::PathBuf;

/// Arguments for the convert command
#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// Model to read (either form)
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// File to write
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Form of the written model
    #[arg(short, long, value_enum, default_value = "binary")]
    pub to: ModelFormat,
}

/// Serialized model forms
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ModelFormat {
    /// Compact binary form
    Binary,
    /// C array initializers
    Literal,
}

impl ConvertArgs {
    /// Execute the convert command
    pub fn execute(&self) -> Result<()> {
        let model = load_model_file(&self.input)?;
        let parts = model.to_parts();

        let bytes = match self.to {
            ModelFormat::Binary => encode_binary(&parts).map_err(|e| CliError::ModelError(e.to_string()))?,
            ModelFormat::Literal => encode_literal(&parts).into_bytes(),
        };

        fs::write(&self.output, &bytes).with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!(
            "✓ Wrote {:?} model to {} ({} bytes)",
            self.to,
            self.output.display(),
            bytes.len()
        );
        Ok(())
    }
}
