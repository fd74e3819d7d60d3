//! Recommendation engine: one immutable session over a catalog.
//!
//! All four derived structures are built eagerly in [`Recommender::new`]:
//!
//! - TF-IDF feature vectors → content similarity matrix
//! - interaction matrix → user similarity matrix
//!
//! Queries only read them, so a `Recommender` can be shared freely once built.

pub mod ranking;
pub mod results;

use crate::catalog::{Catalog, UserId};
use crate::error::{Error, Result};
use crate::features::FeatureMatrix;
use crate::interaction::InteractionMatrix;
use crate::similarity::{SimilarityMatrix, UserSimilarity};
use ndarray::{Array1, ArrayView1, Zip};
use ranking::top_k_excluding;
use results::{EngineStats, Lookup, ScoredBook, SimilarUser};
use std::time::Instant;
use tracing::{debug, info};

/// Number of results every query returns at most.
pub const TOP_K: usize = 3;
/// Weight of content similarity in the hybrid score.
pub const CONTENT_WEIGHT: f64 = 0.6;
/// Weight of the user's own rating in the hybrid score.
pub const RATING_WEIGHT: f64 = 0.4;

/// Precomputed recommendation session.
#[derive(Debug, Clone)]
pub struct Recommender {
    catalog: Catalog,
    features: FeatureMatrix,
    content: SimilarityMatrix,
    interactions: InteractionMatrix,
    users: UserSimilarity,
}

impl Recommender {
    /// Build every matrix for `catalog`.
    ///
    /// Fails with [`Error::EmptyCatalog`], [`Error::EmptyVocabulary`] or
    /// [`Error::EmptyRatings`] when there is nothing to learn from.
    pub fn new(catalog: Catalog) -> Result<Self> {
        let start = Instant::now();

        let features = FeatureMatrix::build(&catalog)?;
        let content = SimilarityMatrix::from_rows(features.vectors());
        let interactions = InteractionMatrix::build(&catalog)?;
        let users = UserSimilarity::build(&interactions);

        info!(
            books = catalog.len(),
            vocabulary = features.dim(),
            users = users.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "recommender ready"
        );

        Ok(Self {
            catalog,
            features,
            content,
            interactions,
            users,
        })
    }

    /// Books most similar in text to the first book titled `title`.
    pub fn recommend_by_content(&self, title: &str) -> Result<Vec<ScoredBook>> {
        let row = self.resolve_title(title)?;
        let ranked = top_k_excluding(self.content.row(row), row, TOP_K);
        debug!(title, row, results = ranked.len(), "content query");
        Ok(self.to_books(ranked))
    }

    /// Users whose rating rows point the same way as `user`'s.
    pub fn recommend_by_collaboration(&self, user: UserId) -> Lookup<Vec<SimilarUser>> {
        let Some(row) = self.users.position(user) else {
            debug!(%user, "collaborative query for unknown user");
            return Lookup::NotFound(user);
        };

        let ids = self.users.users();
        let neighbours = top_k_excluding(self.users.matrix().row(row), row, TOP_K)
            .into_iter()
            .map(|(i, score)| SimilarUser {
                user_id: ids[i],
                score,
            })
            .collect::<Vec<_>>();
        debug!(%user, row, results = neighbours.len(), "collaborative query");
        Lookup::Found(neighbours)
    }

    /// Blend content similarity to `title` with `user`'s own ratings.
    ///
    /// The user is checked before the title: an unknown user yields
    /// [`Lookup::NotFound`] even when the title is unknown too.
    pub fn recommend_hybrid(&self, title: &str, user: UserId) -> Result<Lookup<Vec<ScoredBook>>> {
        let catalog_order = self.catalog.books().iter().map(|b| b.id);
        let Some(ratings) = self.interactions.aligned_row(user, catalog_order) else {
            debug!(%user, "hybrid query for unknown user");
            return Ok(Lookup::NotFound(user));
        };

        let row = self.resolve_title(title)?;
        let scores = hybrid_scores(self.content.row(row), ratings.view());
        let ranked = top_k_excluding(scores.view(), row, TOP_K);
        debug!(title, %user, row, results = ranked.len(), "hybrid query");
        Ok(Lookup::Found(self.to_books(ranked)))
    }

    /// Catalog row for a title, first match in catalog order.
    pub fn resolve_title(&self, title: &str) -> Result<usize> {
        self.catalog
            .find_by_title(title)
            .ok_or_else(|| Error::BookNotFound {
                title: title.to_string(),
            })
    }

    pub fn stats(&self) -> EngineStats {
        EngineStats {
            books: self.catalog.len(),
            users: self.users.len(),
            book_columns: self.interactions.books().len(),
            vocabulary: self.features.dim(),
            rating_events: self.catalog.ratings().len(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn features(&self) -> &FeatureMatrix {
        &self.features
    }

    pub fn content_similarity(&self) -> &SimilarityMatrix {
        &self.content
    }

    pub fn interactions(&self) -> &InteractionMatrix {
        &self.interactions
    }

    pub fn user_similarity(&self) -> &UserSimilarity {
        &self.users
    }

    fn to_books(&self, ranked: Vec<(usize, f64)>) -> Vec<ScoredBook> {
        ranked
            .into_iter()
            .filter_map(|(row, score)| {
                self.catalog.book(row).map(|book| ScoredBook {
                    book_id: book.id,
                    title: book.title.clone(),
                    score,
                })
            })
            .collect()
    }
}

/// Per-book hybrid score: `0.6 × content + 0.4 × rating`, element by element.
///
/// Both inputs must be in catalog order.
pub fn hybrid_scores(content: ArrayView1<'_, f64>, ratings: ArrayView1<'_, f64>) -> Array1<f64> {
    Zip::from(&content)
        .and(&ratings)
        .map_collect(|&c, &r| CONTENT_WEIGHT * c + RATING_WEIGHT * r)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Book, BookId, Rating};
    use ndarray::array;

    fn titles(books: &[ScoredBook]) -> Vec<&str> {
        books.iter().map(|b| b.title.as_str()).collect()
    }

    fn library() -> Recommender {
        let books = vec![
            Book::new(101, "Emma", "Jane Austen", "Romance"),
            Book::new(102, "Persuasion", "Jane Austen", "Romance"),
            Book::new(103, "Dune", "Frank Herbert", "SciFi"),
            Book::new(104, "Dune Messiah", "Frank Herbert", "SciFi"),
            Book::new(105, "Sense and Sensibility", "Jane Austen", "Romance"),
            Book::new(106, "Neuromancer", "William Gibson", "SciFi"),
        ];
        let ratings = vec![
            Rating::new(1, 101, 5.0),
            Rating::new(1, 102, 4.0),
            Rating::new(2, 101, 5.0),
            Rating::new(2, 102, 5.0),
            Rating::new(2, 105, 4.0),
            Rating::new(3, 103, 5.0),
            Rating::new(3, 104, 4.0),
            Rating::new(4, 103, 4.0),
            Rating::new(4, 106, 5.0),
            Rating::new(5, 101, 1.0),
            Rating::new(5, 106, 5.0),
        ];
        Recommender::new(Catalog::new(books, ratings)).expect("recommender")
    }

    #[test]
    fn test_content_prefers_same_author_and_genre() {
        let rec = library();
        let results = rec.recommend_by_content("Emma").expect("known title");
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|b| b.title != "Emma"));
        let top_two: Vec<&str> = titles(&results[..2]);
        assert!(top_two.contains(&"Persuasion"));
        assert!(top_two.contains(&"Sense and Sensibility"));
        for pair in results.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_content_unknown_title_is_error() {
        let rec = library();
        let err = rec.recommend_by_content("Ulysses").unwrap_err();
        assert!(matches!(err, Error::BookNotFound { ref title } if title == "Ulysses"));
        // the session stays usable
        assert!(rec.recommend_by_content("Dune").is_ok());
    }

    #[test]
    fn test_collaboration_excludes_self() {
        let rec = library();
        let neighbours = rec
            .recommend_by_collaboration(UserId(1))
            .into_found()
            .expect("known user");
        assert_eq!(neighbours.len(), 3);
        assert!(neighbours.iter().all(|n| n.user_id != UserId(1)));
        assert_eq!(neighbours[0].user_id, UserId(2));
        for pair in neighbours.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_collaboration_unknown_user() {
        let rec = library();
        assert_eq!(
            rec.recommend_by_collaboration(UserId(999)),
            Lookup::NotFound(UserId(999))
        );
    }

    #[test]
    fn test_hybrid_unknown_user_before_unknown_title() {
        let rec = library();
        let outcome = rec
            .recommend_hybrid("No Such Book", UserId(999))
            .expect("unknown user is not an error");
        assert!(outcome.is_not_found());

        let err = rec.recommend_hybrid("No Such Book", UserId(1)).unwrap_err();
        assert!(matches!(err, Error::BookNotFound { .. }));
    }

    #[test]
    fn test_hybrid_blends_ratings_in_catalog_order() {
        let rec = library();
        let results = rec
            .recommend_hybrid("Dune", UserId(5))
            .expect("query")
            .into_found()
            .expect("known user");
        assert!(results.iter().all(|b| b.book_id != BookId(103)));
        // user 5 rated Neuromancer 5, which outweighs any content score
        assert_eq!(results[0].title, "Neuromancer");

        let content = rec.content_similarity().get(2, 5);
        assert!((results[0].score - (0.6 * content + 0.4 * 5.0)).abs() < 1e-12);
    }

    #[test]
    fn test_hybrid_scores_are_per_element() {
        let content = array![1.0, 0.5, 0.0];
        let ratings = array![0.0, 2.0, 5.0];
        let scores = hybrid_scores(content.view(), ratings.view());
        assert!((scores[0] - 0.6).abs() < 1e-12);
        assert!((scores[1] - 1.1).abs() < 1e-12);
        assert!((scores[2] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_queries_are_idempotent() {
        let rec = library();
        assert_eq!(
            rec.recommend_by_content("Dune").expect("first"),
            rec.recommend_by_content("Dune").expect("second")
        );
        assert_eq!(
            rec.recommend_by_collaboration(UserId(3)),
            rec.recommend_by_collaboration(UserId(3))
        );
        assert_eq!(
            rec.recommend_hybrid("Emma", UserId(2)).expect("first"),
            rec.recommend_hybrid("Emma", UserId(2)).expect("second")
        );
    }

    #[test]
    fn test_stats() {
        let stats = library().stats();
        assert_eq!(stats.books, 6);
        assert_eq!(stats.users, 5);
        assert_eq!(stats.book_columns, 6);
        assert_eq!(stats.rating_events, 11);
        assert!(stats.vocabulary > 0);
    }

    #[test]
    fn test_empty_inputs_fail_construction() {
        let err = Recommender::new(Catalog::new(Vec::new(), vec![Rating::new(1, 1, 5.0)]))
            .unwrap_err();
        assert!(matches!(err, Error::EmptyCatalog));

        let err = Recommender::new(Catalog::new(
            vec![Book::new(1, "Emma", "Jane Austen", "Romance")],
            Vec::new(),
        ))
        .unwrap_err();
        assert!(matches!(err, Error::EmptyRatings));
    }
}
