//! Model fixtures shared by the integration tests

#![allow(dead_code)]

use langid_core::model::ALPHABET_SIZE;
use langid_core::ModelParts;
use proptest::prelude::*;

/// Model whose features are single bytes of `alphabet`.
///
/// State `i + 1` is entered on `alphabet[i]` from anywhere and completes
/// feature `i`; every other byte returns to the start state.
pub fn unigram_parts(alphabet: &[u8], priors: &[f64], likelihoods: &[f64], labels: &[String]) -> ModelParts {
    let num_states = alphabet.len() + 1;
    let mut tk_nextmove = vec![0u32; num_states * ALPHABET_SIZE];
    for state in 0..num_states {
        for (i, &byte) in alphabet.iter().enumerate() {
            tk_nextmove[state * ALPHABET_SIZE + byte as usize] = i as u32 + 1;
        }
    }
    let outputs: Vec<Vec<u32>> = std::iter::once(Vec::new())
        .chain((0..alphabet.len() as u32).map(|f| vec![f]))
        .collect();
    let (tk_output_c, tk_output_s, tk_output) = ModelParts::pack_outputs(num_states, &outputs);

    ModelParts {
        num_feats: alphabet.len() as u32,
        num_langs: labels.len() as u32,
        num_states: num_states as u32,
        tk_nextmove,
        tk_output_c,
        tk_output_s,
        tk_output,
        nb_pc: priors.to_vec(),
        nb_ptc: likelihoods.to_vec(),
        nb_classes: labels.to_vec(),
    }
}

/// Language "A" favours byte `a`, language "B" favours byte `b`; equal priors.
pub fn two_language_parts() -> ModelParts {
    let (likely, unlikely) = (0.99f64.ln(), 0.01f64.ln());
    unigram_parts(
        b"ab",
        &[0.5f64.ln(), 0.5f64.ln()],
        &[likely, unlikely, unlikely, likely],
        &["A".to_string(), "B".to_string()],
    )
}

/// Bytes the arbitrary models know, plus a few they do not
pub const TEXT_BYTES: &[u8] = b"abcdefxyz \n\xc3\xa9\xff";

/// Arbitrary unigram model with 1..=5 languages and 1..=6 features
pub fn arb_parts() -> impl Strategy<Value = ModelParts> {
    (1usize..=5, 1usize..=6)
        .prop_flat_map(|(langs, feats)| {
            (
                prop::collection::vec(-8.0f64..-0.01, langs),
                prop::collection::vec(-12.0f64..-0.01, langs * feats),
                Just(langs),
                Just(feats),
            )
        })
        .prop_map(|(priors, likelihoods, langs, feats)| {
            let alphabet: Vec<u8> = (b'a'..).take(feats).collect();
            let labels: Vec<String> = (0..langs).map(|i| format!("l{i}")).collect();
            unigram_parts(&alphabet, &priors, &likelihoods, &labels)
        })
}

/// Arbitrary input text drawn mostly from bytes the models know
pub fn arb_text() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(prop::sample::select(TEXT_BYTES.to_vec()), 0..48)
}
