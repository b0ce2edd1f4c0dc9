//! Validate command implementation

use anyhow::Result;
use clap::Args;
use langid_core::Model;
use std::path::PathBuf;

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Path to the model file to validate
    #[arg(short, long, value_name = "FILE", required = true)]
    pub model: PathBuf,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        println!("Validating model: {}", self.model.display());

        match Model::from_path(&self.model) {
            Ok(model) => {
                println!("✓ Model is valid!");
                println!("  States:    {}", model.num_states());
                println!("  Features:  {}", model.num_feats());
                println!("  Languages: {}", model.num_langs());
                println!("  Labels:    {}", model.nb_classes().join(", "));
                Ok(())
            }
            Err(e) => {
                println!("✗ Model is invalid!");
                println!("  Error: {e}");
                Err(anyhow::anyhow!("Validation failed: {}", e))
            }
        }
    }
}
