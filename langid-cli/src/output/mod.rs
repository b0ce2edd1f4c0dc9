//! Output formatting module

use anyhow::Result;
use langid_core::Prediction;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format and output the predictions for one input
    fn write_record(&mut self, source: &str, predictions: &[Prediction]) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tab-separated, one line per input
    #[default]
    Text,
    /// JSON array of records
    Json,
}

/// Create the formatter for `format` writing to `writer`
pub fn create_formatter(format: OutputFormat, writer: Box<dyn Write + Send + Sync>) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(writer)),
        OutputFormat::Json => Box::new(JsonFormatter::new(writer)),
    }
}
