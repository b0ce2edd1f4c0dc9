//! Byte n-gram language identification
//!
//! A precompiled Aho-Corasick automaton extracts byte n-gram features from
//! raw input, and a Naive Bayes classifier scores them against per-language
//! log-probabilities. The model is loaded once, validated, and shared
//! read-only; everything mutable lives in a [`LanguageIdentifier`].
//!
//! ```no_run
//! use langid_core::{LanguageIdentifier, Model};
//!
//! # fn main() -> langid_core::Result<()> {
//! let model = Model::from_path("model.bin")?;
//! let mut identifier = LanguageIdentifier::new(model);
//! identifier.set_languages(&["en", "de", "fr"])?;
//!
//! let prediction = identifier.classify("Dies ist ein kurzer Satz.");
//! println!("{} {:.3}", prediction.language, prediction.score);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod identifier;
pub mod model;
pub mod ranking;
pub mod scorer;
pub mod sparse_set;
pub mod subset;
pub mod tokenizer;

#[cfg(test)]
mod test_utils;

pub use config::IdentifierConfig;
pub use error::{LangIdError, MalformedModel, Result};
pub use identifier::{LanguageIdentifier, LanguageIdentifierBuilder, Prediction};
pub use model::{load_model, Model, ModelParts};
pub use sparse_set::SparseCounter;
pub use subset::LanguageSubset;
pub use tokenizer::{FeatureScratch, Tokenizer};
