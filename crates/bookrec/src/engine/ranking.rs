//! Ranking helpers shared by every query.

use ndarray::ArrayView1;
use std::cmp::Ordering;

/// Rank positions by descending score, skip `exclude`, keep the first `k`.
///
/// The sort is stable: equal scores keep ascending position order.
pub fn top_k_excluding(
    scores: ArrayView1<'_, f64>,
    exclude: usize,
    k: usize,
) -> Vec<(usize, f64)> {
    let mut ranked: Vec<(usize, f64)> = scores
        .iter()
        .copied()
        .enumerate()
        .filter(|&(i, _)| i != exclude)
        .collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    ranked.truncate(k);
    ranked
}

/// Round to two decimals, the precision similarity scores are displayed with.
pub fn round2(score: f64) -> f64 {
    (score * 100.0).round() / 100.0
}
