//! Pairwise cosine similarity matrices over books and users.

use crate::catalog::UserId;
use crate::interaction::InteractionMatrix;
use ndarray::{Array2, ArrayView1};
use std::collections::HashMap;

/// Compute cosine similarity between two vectors.
///
/// A zero vector has similarity 0 with everything, itself included.
pub fn cosine_similarity(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    let norm_a = l2_norm(a);
    let norm_b = l2_norm(b);
    cosine_with_norms(a, b, norm_a, norm_b)
}

fn l2_norm(v: ArrayView1<'_, f64>) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

fn cosine_with_norms(
    a: ArrayView1<'_, f64>,
    b: ArrayView1<'_, f64>,
    norm_a: f64,
    norm_b: f64,
) -> f64 {
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (a.dot(&b) / (norm_a * norm_b)).clamp(-1.0, 1.0)
}

/// Square, exactly symmetric matrix of pairwise cosine similarities.
///
/// Only the upper triangle is computed; the lower one is mirrored from it. The
/// diagonal of a non-zero row is pinned to 1.0 so self-similarity is always the
/// row maximum; a zero row stays all-zero.
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    scores: Array2<f64>,
}

impl SimilarityMatrix {
    /// Similarities between every pair of rows of `vectors`.
    pub fn from_rows(vectors: &Array2<f64>) -> Self {
        let n = vectors.nrows();
        let norms: Vec<f64> = vectors.rows().into_iter().map(l2_norm).collect();
        let mut scores = Array2::<f64>::zeros((n, n));

        for i in 0..n {
            scores[[i, i]] = if norms[i] > 0.0 { 1.0 } else { 0.0 };
            for j in (i + 1)..n {
                let sim = cosine_with_norms(vectors.row(i), vectors.row(j), norms[i], norms[j]);
                scores[[i, j]] = sim;
                scores[[j, i]] = sim;
            }
        }

        Self { scores }
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.scores[[i, j]]
    }

    /// Similarities of row `i` against every row.
    pub fn row(&self, i: usize) -> ArrayView1<'_, f64> {
        self.scores.row(i)
    }

    /// Number of rows (and columns).
    pub fn len(&self) -> usize {
        self.scores.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.nrows() == 0
    }

    pub fn as_array(&self) -> &Array2<f64> {
        &self.scores
    }
}

/// User × user similarity addressed by [`UserId`] on both axes.
#[derive(Debug, Clone)]
pub struct UserSimilarity {
    users: Vec<UserId>,
    index: HashMap<UserId, usize>,
    matrix: SimilarityMatrix,
}

impl UserSimilarity {
    /// Cosine similarity between every pair of interaction rows.
    pub fn build(interactions: &InteractionMatrix) -> Self {
        let users = interactions.users().to_vec();
        let index = users.iter().enumerate().map(|(row, &u)| (u, row)).collect();
        let matrix = SimilarityMatrix::from_rows(interactions.grid());
        Self {
            users,
            index,
            matrix,
        }
    }

    /// Users in row order (ascending id).
    pub fn users(&self) -> &[UserId] {
        &self.users
    }

    /// Row of a user, if the user has any rating.
    pub fn position(&self, user: UserId) -> Option<usize> {
        self.index.get(&user).copied()
    }

    pub fn contains(&self, user: UserId) -> bool {
        self.index.contains_key(&user)
    }

    /// Similarity between two users, if both are known.
    pub fn get(&self, a: UserId, b: UserId) -> Option<f64> {
        Some(self.matrix.get(self.position(a)?, self.position(b)?))
    }

    pub fn matrix(&self) -> &SimilarityMatrix {
        &self.matrix
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
