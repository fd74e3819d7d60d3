//! Values returned by recommendation queries.

use crate::catalog::{BookId, UserId};
use crate::engine::ranking::round2;
use serde::Serialize;

/// Outcome of a query keyed by a user id.
///
/// An unknown user is an expected outcome, not a failure, so it is a value here
/// rather than an [`crate::Error`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "result", rename_all = "snake_case")]
pub enum Lookup<T> {
    Found(T),
    NotFound(UserId),
}

impl<T> Lookup<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Lookup::NotFound(_))
    }

    pub fn found(&self) -> Option<&T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::NotFound(_) => None,
        }
    }

    pub fn into_found(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::NotFound(_) => None,
        }
    }
}

/// A recommended book with the score it was ranked by.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredBook {
    pub book_id: BookId,
    pub title: String,
    pub score: f64,
}

/// A neighbouring user from the collaborative query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimilarUser {
    pub user_id: UserId,
    pub score: f64,
}

impl SimilarUser {
    /// Score rounded to two decimals for display.
    pub fn display_score(&self) -> f64 {
        round2(self.score)
    }
}

/// Sizes of everything a session built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EngineStats {
    pub books: usize,
    pub users: usize,
    pub book_columns: usize,
    pub vocabulary: usize,
    pub rating_events: usize,
}
