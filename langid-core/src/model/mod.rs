//! Trained model representation
//!
//! A [`Model`] is built exactly once, from a [`ModelParts`] record produced
//! by one of the two decoders ([`binary`] or [`literal`]). Both decoders
//! funnel through [`Model::from_parts`], which is the only place the
//! structural invariants are checked. Everything downstream (tokenizer,
//! scorer, ranking) trusts the dimensions stored here.

pub mod binary;
pub mod literal;

use crate::error::{LangIdError, MalformedModel};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

pub use binary::{decode_binary, encode_binary, BINARY_MAGIC, BINARY_MAGIC_PREFIX};
pub use literal::{decode_literal, encode_literal};

/// Number of transitions leaving every automaton state (one per byte value)
pub const ALPHABET_SIZE: usize = 256;

/// Identifier of an automaton state
pub type StateId = u32;

/// Identifier of a byte n-gram feature
pub type FeatureId = u32;

/// Persisted model layout, shared by both serialized forms.
///
/// Field order matches the on-disk order: scalar header, transition
/// table, output index, Naive Bayes parameters, class labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelParts {
    /// Number of distinct features
    pub num_feats: u32,
    /// Number of languages
    pub num_langs: u32,
    /// Number of automaton states
    pub num_states: u32,
    /// `num_states` rows of 256 next-state indices, row-major
    pub tk_nextmove: Vec<StateId>,
    /// Number of features completed on entering each state
    pub tk_output_c: Vec<u32>,
    /// Start offset of each state's list in `tk_output`
    pub tk_output_s: Vec<u32>,
    /// Flat array of completed feature ids
    pub tk_output: Vec<FeatureId>,
    /// log P(language)
    pub nb_pc: Vec<f64>,
    /// log P(feature | language), feature-major
    pub nb_ptc: Vec<f64>,
    /// Language labels, aligned with `nb_pc`
    pub nb_classes: Vec<String>,
}

impl ModelParts {
    /// Pack per-state output lists into the `(count, start, flat)` triple.
    ///
    /// States beyond the end of `outputs` complete nothing.
    pub fn pack_outputs(num_states: usize, outputs: &[Vec<FeatureId>]) -> (Vec<u32>, Vec<u32>, Vec<FeatureId>) {
        let mut counts = Vec::with_capacity(num_states);
        let mut starts = Vec::with_capacity(num_states);
        let mut flat = Vec::new();

        for state in 0..num_states {
            let feats = outputs.get(state).map(Vec::as_slice).unwrap_or(&[]);
            counts.push(feats.len() as u32);
            starts.push(flat.len() as u32);
            flat.extend_from_slice(feats);
        }

        (counts, starts, flat)
    }
}

/// Immutable, validated language identification model.
///
/// The model is `Send + Sync` and is meant to be shared behind an
/// [`Arc`](std::sync::Arc) by any number of identifiers.
#[derive(Debug, Clone)]
pub struct Model {
    num_feats: usize,
    num_langs: usize,
    num_states: usize,
    transitions: Box<[StateId]>,
    /// Half-open `[start, end)` span into `output_feats`, one per state
    output_spans: Box<[(u32, u32)]>,
    output_feats: Box<[FeatureId]>,
    log_prior: Box<[f64]>,
    log_likelihood: Box<[f64]>,
    classes: Box<[String]>,
    class_index: HashMap<String, usize>,
}

impl Model {
    /// Validate a decoded record and build the model.
    pub fn from_parts(parts: ModelParts) -> Result<Self, MalformedModel> {
        let num_feats = positive("num_feats", parts.num_feats)?;
        let num_langs = positive("num_langs", parts.num_langs)?;
        let num_states = positive("num_states", parts.num_states)?;

        let table_len = checked_area("tk_nextmove", num_states, ALPHABET_SIZE)?;
        expect_len("tk_nextmove", table_len, parts.tk_nextmove.len())?;
        expect_len("tk_output_c", num_states, parts.tk_output_c.len())?;
        expect_len("tk_output_s", num_states, parts.tk_output_s.len())?;
        expect_len("nb_pc", num_langs, parts.nb_pc.len())?;
        let ptc_len = checked_area("nb_ptc", num_feats, num_langs)?;
        expect_len("nb_ptc", ptc_len, parts.nb_ptc.len())?;
        expect_len("nb_classes", num_langs, parts.nb_classes.len())?;

        if let Some((index, &state)) = parts
            .tk_nextmove
            .iter()
            .enumerate()
            .find(|(_, &s)| s as usize >= num_states)
        {
            return Err(MalformedModel::StateOutOfRange {
                index,
                state,
                num_states,
            });
        }

        // Offsets must tile tk_output in state order with no gaps or overlaps.
        let mut output_spans = Vec::with_capacity(num_states);
        let mut expected = 0usize;
        for (state, (&count, &start)) in parts.tk_output_c.iter().zip(&parts.tk_output_s).enumerate() {
            if start as usize != expected {
                return Err(MalformedModel::OutputIndexGap {
                    state,
                    expected,
                    actual: start as usize,
                });
            }
            let end = expected + count as usize;
            output_spans.push((start, end as u32));
            expected = end;
        }
        expect_len("tk_output", expected, parts.tk_output.len())?;

        if let Some((index, &feature)) = parts
            .tk_output
            .iter()
            .enumerate()
            .find(|(_, &f)| f as usize >= num_feats)
        {
            return Err(MalformedModel::FeatureOutOfRange {
                index,
                feature,
                num_feats,
            });
        }

        for (field, values) in [("nb_pc", &parts.nb_pc), ("nb_ptc", &parts.nb_ptc)] {
            if let Some(index) = values.iter().position(|v| v.is_nan()) {
                return Err(MalformedModel::NotANumber { field, index });
            }
            // -inf is a valid log-probability; +inf would turn scores into NaN
            if let Some(index) = values.iter().position(|&v| v == f64::INFINITY) {
                return Err(MalformedModel::NotFinite { field, index });
            }
        }

        let mut class_index = HashMap::with_capacity(num_langs);
        for (i, label) in parts.nb_classes.iter().enumerate() {
            if class_index.insert(label.clone(), i).is_some() {
                return Err(MalformedModel::DuplicateLabel {
                    label: label.clone(),
                });
            }
        }

        log::debug!(
            "loaded model: {num_states} states, {num_feats} features, {num_langs} languages"
        );

        Ok(Self {
            num_feats,
            num_langs,
            num_states,
            transitions: parts.tk_nextmove.into_boxed_slice(),
            output_spans: output_spans.into_boxed_slice(),
            output_feats: parts.tk_output.into_boxed_slice(),
            log_prior: parts.nb_pc.into_boxed_slice(),
            log_likelihood: parts.nb_ptc.into_boxed_slice(),
            classes: parts.nb_classes.into_boxed_slice(),
            class_index,
        })
    }

    /// Decode a model from either serialized form.
    ///
    /// Payloads starting with [`BINARY_MAGIC_PREFIX`] go to the binary
    /// decoder, anything else must be UTF-8 source-literal text.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MalformedModel> {
        let parts = if bytes.starts_with(BINARY_MAGIC_PREFIX) {
            log::debug!("decoding binary model ({} bytes)", bytes.len());
            decode_binary(bytes)?
        } else {
            let text = std::str::from_utf8(bytes).map_err(|e| {
                MalformedModel::Decode(format!("neither a binary model nor UTF-8 text: {e}"))
            })?;
            log::debug!("decoding source-literal model ({} bytes)", bytes.len());
            decode_literal(text)?
        };
        Self::from_parts(parts)
    }

    /// Read and decode a model file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::from_bytes(&bytes).map_err(LangIdError::from)
    }

    /// Rebuild the persisted record, e.g. to re-export in another form.
    pub fn to_parts(&self) -> ModelParts {
        let tk_output_c = self.output_spans.iter().map(|&(s, e)| e - s).collect();
        let tk_output_s = self.output_spans.iter().map(|&(s, _)| s).collect();

        ModelParts {
            num_feats: self.num_feats as u32,
            num_langs: self.num_langs as u32,
            num_states: self.num_states as u32,
            tk_nextmove: self.transitions.to_vec(),
            tk_output_c,
            tk_output_s,
            tk_output: self.output_feats.to_vec(),
            nb_pc: self.log_prior.to_vec(),
            nb_ptc: self.log_likelihood.to_vec(),
            nb_classes: self.classes.to_vec(),
        }
    }

    /// Number of distinct features
    pub fn num_feats(&self) -> usize {
        self.num_feats
    }

    /// Number of languages
    pub fn num_langs(&self) -> usize {
        self.num_langs
    }

    /// Number of automaton states
    pub fn num_states(&self) -> usize {
        self.num_states
    }

    /// All class labels in model order
    pub fn nb_classes(&self) -> &[String] {
        &self.classes
    }

    /// Position of `label` in [`nb_classes`](Self::nb_classes)
    pub fn label_index(&self, label: &str) -> Option<usize> {
        self.class_index.get(label).copied()
    }

    /// Follow the transition for `byte` out of `state`.
    #[inline]
    pub fn next_state(&self, state: StateId, byte: u8) -> StateId {
        self.transitions[state as usize * ALPHABET_SIZE + byte as usize]
    }

    /// Features completed on entering `state`.
    #[inline]
    pub fn outputs(&self, state: StateId) -> &[FeatureId] {
        let (start, end) = self.output_spans[state as usize];
        &self.output_feats[start as usize..end as usize]
    }

    /// log P(language) for every language in model order
    pub fn log_prior(&self) -> &[f64] {
        &self.log_prior
    }

    /// log P(feature | language) for every language in model order
    #[inline]
    pub fn log_likelihood_row(&self, feature: FeatureId) -> &[f64] {
        let start = feature as usize * self.num_langs;
        &self.log_likelihood[start..start + self.num_langs]
    }
}

/// Decode a serialized model, see [`Model::from_bytes`].
pub fn load_model(bytes: &[u8]) -> Result<Model, MalformedModel> {
    Model::from_bytes(bytes)
}

fn positive(field: &'static str, value: u32) -> Result<usize, MalformedModel> {
    if value == 0 {
        Err(MalformedModel::EmptyDimension { field })
    } else {
        Ok(value as usize)
    }
}

fn checked_area(field: &'static str, rows: usize, cols: usize) -> Result<usize, MalformedModel> {
    rows.checked_mul(cols)
        .ok_or_else(|| MalformedModel::Decode(format!("`{field}` size overflows: {rows} x {cols}")))
}

fn expect_len(field: &'static str, expected: usize, actual: usize) -> Result<(), MalformedModel> {
    if expected == actual {
        Ok(())
    } else {
        Err(MalformedModel::SizeMismatch {
            field,
            expected,
            actual,
        })
    }
}
