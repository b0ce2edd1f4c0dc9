//! langid CLI library
//!
//! Command implementations for the `langid` binary: classifying files or
//! stdin, listing a model's languages, converting between model forms and
//! validating model files.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;

pub use error::{CliError, CliResult};
