//! Byte n-gram extraction by automaton walk
//!
//! The model's transition table is an Aho-Corasick automaton compiled over
//! byte n-grams. Walking it one byte at a time, the state reached after
//! each byte identifies every n-gram ending at that position.
//!
//! The walk runs in two passes. First only state visits are counted;
//! then each distinct visited state's output list is expanded once,
//! weighted by its visit count. The resulting feature counts are the same
//! as expanding after every byte, but each output list is read once per
//! call instead of once per occurrence.

use crate::model::{Model, StateId};
use crate::sparse_set::SparseCounter;

/// Start state of every walk
pub const START_STATE: StateId = 0;

/// Reusable accumulators for one tokenizer pass.
///
/// Sized once from the model and cleared (not reallocated) per call.
/// A scratch must never be shared between concurrent calls.
#[derive(Debug, Clone)]
pub struct FeatureScratch {
    states: SparseCounter,
    features: SparseCounter,
}

impl FeatureScratch {
    /// Allocate accumulators sized for `model`
    pub fn for_model(model: &Model) -> Self {
        Self {
            states: SparseCounter::with_capacity(model.num_states()),
            features: SparseCounter::with_capacity(model.num_feats()),
        }
    }

    /// Features counted by the last pass
    pub fn features(&self) -> &SparseCounter {
        &self.features
    }

    fn fit(&mut self, model: &Model) {
        if self.states.capacity() != model.num_states() || self.features.capacity() != model.num_feats() {
            *self = Self::for_model(model);
        }
    }
}

/// Feature extractor bound to one model
#[derive(Debug, Clone, Copy)]
pub struct Tokenizer<'m> {
    model: &'m Model,
}

impl<'m> Tokenizer<'m> {
    /// Create a tokenizer over `model`'s automaton
    pub fn new(model: &'m Model) -> Self {
        Self { model }
    }

    /// Count the features occurring in `text`.
    ///
    /// Every call starts from [`START_STATE`]; nothing carries over from a
    /// previous call. Empty input yields an empty feature set.
    pub fn extract<'s>(&self, text: &[u8], scratch: &'s mut FeatureScratch) -> &'s SparseCounter {
        scratch.fit(self.model);
        let FeatureScratch { states, features } = scratch;
        states.clear();
        features.clear();

        let mut state = START_STATE;
        for &byte in text {
            state = self.model.next_state(state, byte);
            states.add(state, 1);
        }

        for (state, visits) in states.iter() {
            for &feature in self.model.outputs(state) {
                features.add(feature, visits);
            }
        }

        log::trace!(
            "extracted {} distinct features from {} bytes ({} distinct states)",
            features.len(),
            text.len(),
            states.len()
        );

        features
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ModelParts, ALPHABET_SIZE};
    use crate::test_utils::ab_model;

    /// Automaton recognising "ab" (feature 0), "b" (feature 1) and "abc" (feature 2)
    fn overlapping_model() -> Model {
        // 0: start, 1: "a", 2: "ab", 3: "b", 4: "abc"
        let num_states = 5;
        let mut next = vec![0u32; num_states * ALPHABET_SIZE];
        for s in 0..num_states {
            next[s * ALPHABET_SIZE + b'a' as usize] = 1;
            next[s * ALPHABET_SIZE + b'b' as usize] = 3;
        }
        next[ALPHABET_SIZE + b'b' as usize] = 2;
        next[2 * ALPHABET_SIZE + b'c' as usize] = 4;

        let outputs = vec![vec![], vec![], vec![0, 1], vec![1], vec![2]];
        let (c, s, flat) = ModelParts::pack_outputs(num_states, &outputs);
        Model::from_parts(ModelParts {
            num_feats: 3,
            num_langs: 1,
            num_states: num_states as u32,
            tk_nextmove: next,
            tk_output_c: c,
            tk_output_s: s,
            tk_output: flat,
            nb_pc: vec![0.0],
            nb_ptc: vec![-1.0; 3],
            nb_classes: vec!["xx".to_string()],
        })
        .unwrap()
    }

    #[test]
    fn test_counts_single_byte_features() {
        let model = ab_model();
        let mut scratch = FeatureScratch::for_model(&model);
        let features = Tokenizer::new(&model).extract(b"abaxa", &mut scratch);

        assert_eq!(features.count(0), 3);
        assert_eq!(features.count(1), 1);
        assert_eq!(features.len(), 2);
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        let model = ab_model();
        let mut scratch = FeatureScratch::for_model(&model);
        assert!(Tokenizer::new(&model).extract(b"", &mut scratch).is_empty());
    }

    #[test]
    fn test_overlapping_ngrams_all_reported() {
        let model = overlapping_model();
        let mut scratch = FeatureScratch::for_model(&model);
        let features = Tokenizer::new(&model).extract(b"abcab b", &mut scratch);

        assert_eq!(features.count(0), 2); // "ab" twice
        assert_eq!(features.count(1), 3); // every "b"
        assert_eq!(features.count(2), 1); // "abc" once
    }

    #[test]
    fn test_no_state_carried_between_calls() {
        let model = overlapping_model();
        let tokenizer = Tokenizer::new(&model);
        let mut scratch = FeatureScratch::for_model(&model);

        tokenizer.extract(b"a", &mut scratch);
        // Had the walk resumed in state "a", this would complete "ab".
        let features = tokenizer.extract(b"b", &mut scratch);
        assert_eq!(features.count(0), 0);
        assert_eq!(features.count(1), 1);
    }

    #[test]
    fn test_scratch_from_other_model_is_refitted() {
        let small = ab_model();
        let big = overlapping_model();
        let mut scratch = FeatureScratch::for_model(&small);

        let features = Tokenizer::new(&big).extract(b"abc", &mut scratch);
        assert_eq!(features.count(2), 1);
    }

    #[test]
    fn test_non_ascii_bytes_walk_cleanly() {
        let model = ab_model();
        let mut scratch = FeatureScratch::for_model(&model);
        let features = Tokenizer::new(&model).extract("ça été à b".as_bytes(), &mut scratch);

        assert_eq!(features.count(0), 1);
        assert_eq!(features.count(1), 1);
    }
}
