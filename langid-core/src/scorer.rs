//! Naive Bayes log-scoring
//!
//! `score[c] = log P(c) + sum over observed features f of count(f) * log P(f | c)`
//!
//! Only observed features and active languages are visited, so a call costs
//! O(distinct features x active languages) regardless of model size. All
//! arithmetic stays in log space.

use crate::model::Model;
use crate::sparse_set::SparseCounter;
use crate::subset::LanguageSubset;

/// Compute log-scores for the active languages into `out`.
///
/// `out` is cleared first and ends up aligned with the subset's active
/// order. Features are folded in first-touch order, which is a function of
/// the input alone, so repeated calls are bit-identical.
pub fn log_scores(model: &Model, features: &SparseCounter, subset: &LanguageSubset, out: &mut Vec<f64>) {
    out.clear();
    let prior = model.log_prior();

    match subset.indices() {
        None => {
            out.extend_from_slice(prior);
            for (feature, count) in features.iter() {
                let weight = f64::from(count);
                let row = model.log_likelihood_row(feature);
                for (score, &p) in out.iter_mut().zip(row) {
                    *score += weight * p;
                }
            }
        }
        Some(indices) => {
            out.extend(indices.iter().map(|&i| prior[i]));
            for (feature, count) in features.iter() {
                let weight = f64::from(count);
                let row = model.log_likelihood_row(feature);
                for (score, &i) in out.iter_mut().zip(indices) {
                    *score += weight * row[i];
                }
            }
        }
    }
}
