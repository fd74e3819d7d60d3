//! Error types for catalog loading and recommendation queries.

use crate::catalog::{BookId, UserId};
use std::path::PathBuf;

/// Errors raised while building a recommender or answering a catalog lookup.
///
/// Unknown users are not errors: collaborative and hybrid queries report them
/// through [`crate::Lookup::NotFound`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The catalog holds no books, so no vocabulary can be learned.
    #[error("catalog contains no books")]
    EmptyCatalog,

    /// There are no rating events to build the interaction matrix from.
    #[error("ratings contain no events")]
    EmptyRatings,

    /// A rating event holds an infinite value.
    #[error("rating for user {user} and book {book} is not finite: {value}")]
    NonFiniteRating {
        user: UserId,
        book: BookId,
        value: f64,
    },

    /// Books exist, but none of them yields a single token.
    #[error("empty vocabulary: no book title, author or genre contains a usable term")]
    EmptyVocabulary,

    /// No catalog row carries the requested title.
    #[error("book not found: {title:?}")]
    BookNotFound { title: String },

    /// A CSV table could not be parsed.
    #[error("malformed {table} table: {source}")]
    Csv {
        table: &'static str,
        #[source]
        source: csv::Error,
    },

    /// A catalog file could not be opened.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
