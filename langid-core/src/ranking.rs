//! Turning log-scores into a decision or a distribution
//!
//! Ties are resolved toward the lower active index everywhere, so
//! [`best_index`] always agrees with the head of [`ranked_order`].

use std::cmp::Ordering;

/// Position of the highest score; the first one wins a tie.
///
/// Returns `None` for an empty slice.
pub fn best_index(scores: &[f64]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, &score) in scores.iter().enumerate() {
        match best {
            Some(b) if scores[b] >= score => {}
            _ => best = Some(i),
        }
    }
    best
}

/// Positions sorted by descending score, stable on ties.
///
/// Ordering is done on log-scores rather than on the normalized values so
/// that two scores that round to the same probability keep the order
/// [`best_index`] uses.
pub fn ranked_order(scores: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[b].partial_cmp(&scores[a]).unwrap_or(Ordering::Equal));
    order
}

/// Convert log-scores into probabilities in place (softmax).
///
/// The maximum is subtracted before exponentiating, so very negative
/// scores still produce a well-defined distribution summing to 1. When the
/// maximum is infinite the mass is shared equally by the entries equal to it.
pub fn normalize(scores: &mut [f64]) {
    let Some(max) = scores.iter().copied().reduce(f64::max) else {
        return;
    };

    if !max.is_finite() {
        let winners = scores.iter().filter(|&&s| s == max).count() as f64;
        for score in scores.iter_mut() {
            *score = if *score == max { 1.0 / winners } else { 0.0 };
        }
        return;
    }

    let mut sum = 0.0;
    for score in scores.iter_mut() {
        *score = (*score - max).exp();
        sum += *score;
    }
    for score in scores.iter_mut() {
        *score /= sum;
    }
}
