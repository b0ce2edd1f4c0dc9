//! Error types for model loading and identification

use thiserror::Error;

/// Structural problems found while decoding or validating a model.
///
/// A model that fails any check is rejected as a whole; nothing is ever
/// partially loaded.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MalformedModel {
    /// One of the three dimensions is zero
    #[error("model dimension `{field}` must be positive")]
    EmptyDimension {
        /// Name of the dimension
        field: &'static str,
    },

    /// An array does not have the length implied by the header
    #[error("`{field}` has {actual} entries, expected {expected}")]
    SizeMismatch {
        /// Name of the offending array
        field: &'static str,
        /// Length implied by the header
        expected: usize,
        /// Length actually found
        actual: usize,
    },

    /// A transition points past the last state
    #[error("transition {index} targets state {state}, but the model has {num_states} states")]
    StateOutOfRange {
        /// Position in the flat transition table
        index: usize,
        /// The out-of-range target
        state: u32,
        /// Number of states declared by the header
        num_states: usize,
    },

    /// An output list names a feature past the last feature id
    #[error("output entry {index} names feature {feature}, but the model has {num_feats} features")]
    FeatureOutOfRange {
        /// Position in the flat output array
        index: usize,
        /// The out-of-range feature id
        feature: u32,
        /// Number of features declared by the header
        num_feats: usize,
    },

    /// Output offsets and counts do not tile the flat output array
    #[error("output list of state {state} starts at {actual}, expected {expected}")]
    OutputIndexGap {
        /// State whose offset is wrong
        state: usize,
        /// Offset implied by the preceding counts
        expected: usize,
        /// Offset stored in the model
        actual: usize,
    },

    /// A log-probability is NaN
    #[error("`{field}` entry {index} is NaN")]
    NotANumber {
        /// Name of the offending array
        field: &'static str,
        /// Position of the NaN
        index: usize,
    },

    /// A log-probability is positive infinity
    #[error("`{field}` entry {index} is +inf")]
    NotFinite {
        /// Name of the offending array
        field: &'static str,
        /// Position of the infinite entry
        index: usize,
    },

    /// The same class label appears twice
    #[error("duplicate class label '{label}'")]
    DuplicateLabel {
        /// The repeated label
        label: String,
    },

    /// The binary payload could not be decoded
    #[error("undecodable model payload: {0}")]
    Decode(String),

    /// The source-literal text could not be parsed
    #[error("syntax error on line {line}: {message}")]
    Syntax {
        /// 1-based line number
        line: usize,
        /// What went wrong
        message: String,
    },
}

/// Top-level error type of the crate
#[derive(Error, Debug)]
pub enum LangIdError {
    /// Model failed to load
    #[error("malformed model: {0}")]
    MalformedModel(#[from] MalformedModel),

    /// A language restriction named a label the model does not know
    #[error("unknown language '{label}'")]
    UnknownLanguage {
        /// The first label that did not match
        label: String,
    },

    /// Configuration could not be parsed or is inconsistent
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A model could not be serialized
    #[error("model encoding failed: {0}")]
    Encode(String),

    /// I/O error while reading a model or configuration file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for identification operations
pub type Result<T> = std::result::Result<T, LangIdError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_model_display() {
        let err = MalformedModel::SizeMismatch {
            field: "nb_pc",
            expected: 3,
            actual: 2,
        };
        assert_eq!(err.to_string(), "`nb_pc` has 2 entries, expected 3");

        let err = MalformedModel::DuplicateLabel {
            label: "en".to_string(),
        };
        assert_eq!(err.to_string(), "duplicate class label 'en'");
    }

    #[test]
    fn test_malformed_model_converts_into_top_level() {
        let err: LangIdError = MalformedModel::EmptyDimension { field: "num_langs" }.into();
        assert!(matches!(err, LangIdError::MalformedModel(_)));
        assert!(err.to_string().starts_with("malformed model:"));
    }

    #[test]
    fn test_unknown_language_display() {
        let err = LangIdError::UnknownLanguage {
            label: "xx".to_string(),
        };
        assert_eq!(err.to_string(), "unknown language 'xx'");
    }
}
