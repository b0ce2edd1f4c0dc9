//! Shared fixtures for unit tests

use crate::model::{Model, ModelParts, ALPHABET_SIZE};

/// Two-language model over the alphabet {a, b}.
///
/// State 1 is entered on every `a` and completes feature 0, state 2 on
/// every `b` and completes feature 1. Feature 0 is likely under "aa",
/// feature 1 under "bb". Priors are equal.
pub fn ab_parts() -> ModelParts {
    let num_states = 3;
    let mut tk_nextmove = vec![0u32; num_states * ALPHABET_SIZE];
    for state in 0..num_states {
        tk_nextmove[state * ALPHABET_SIZE + b'a' as usize] = 1;
        tk_nextmove[state * ALPHABET_SIZE + b'b' as usize] = 2;
    }
    let (tk_output_c, tk_output_s, tk_output) = ModelParts::pack_outputs(num_states, &[vec![], vec![0], vec![1]]);
    let (likely, unlikely) = (0.9f64.ln(), 0.1f64.ln());

    ModelParts {
        num_feats: 2,
        num_langs: 2,
        num_states: num_states as u32,
        tk_nextmove,
        tk_output_c,
        tk_output_s,
        tk_output,
        nb_pc: vec![0.5f64.ln(), 0.5f64.ln()],
        nb_ptc: vec![likely, unlikely, unlikely, likely],
        nb_classes: vec!["aa".to_string(), "bb".to_string()],
    }
}

/// [`ab_parts`] with custom priors and an extra third language "cc" that
/// no feature favours.
pub fn abc_parts(priors: [f64; 3]) -> ModelParts {
    let mut parts = ab_parts();
    let (likely, unlikely) = (0.9f64.ln(), 0.1f64.ln());
    let neutral = 0.5f64.ln();
    parts.num_langs = 3;
    parts.nb_pc = priors.to_vec();
    parts.nb_ptc = vec![likely, unlikely, neutral, unlikely, likely, neutral];
    parts.nb_classes.push("cc".to_string());
    parts
}

pub fn ab_model() -> Model {
    Model::from_parts(ab_parts()).unwrap()
}
