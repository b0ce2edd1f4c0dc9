//! Languages command implementation

use super::ModelArgs;
use anyhow::{Context, Result};
use clap::Args;
use langid_core::LanguageIdentifier;
use std::io::{self, Write};

/// Arguments for the languages command
#[derive(Debug, Args)]
pub struct LanguagesArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Only list the languages enabled by the config file
    #[arg(short, long)]
    pub active: bool,
}

impl LanguagesArgs {
    /// Execute the languages command
    pub fn execute(&self) -> Result<()> {
        let (model, config) = self.model.load()?;
        let identifier =
            LanguageIdentifier::from_config(model, &config.identifier).context("Failed to configure identifier")?;

        let labels: Vec<&str> = if self.active {
            identifier.active_languages()
        } else {
            identifier.nb_classes().iter().map(String::as_str).collect()
        };

        let mut stdout = io::stdout().lock();
        for label in labels {
            writeln!(stdout, "{label}")?;
        }
        stdout.flush()?;
        Ok(())
    }
}
