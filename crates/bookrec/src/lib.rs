//! Book recommendations from content, collaborative and hybrid similarity.
//!
//! ```
//! use bookrec::{Book, Catalog, Rating, Recommender, UserId};
//!
//! let catalog = Catalog::new(
//!     vec![
//!         Book::new(1, "Emma", "Jane Austen", "Romance"),
//!         Book::new(2, "Persuasion", "Jane Austen", "Romance"),
//!         Book::new(3, "Dune", "Frank Herbert", "SciFi"),
//!     ],
//!     vec![Rating::new(7, 1, 5.0), Rating::new(8, 2, 4.0)],
//! );
//! let recommender = Recommender::new(catalog).expect("non-empty catalog");
//!
//! let similar = recommender.recommend_by_content("Emma").expect("known title");
//! assert_eq!(similar[0].title, "Persuasion");
//!
//! assert!(recommender.recommend_by_collaboration(UserId(42)).is_not_found());
//! ```

pub mod catalog;
pub mod engine;
pub mod error;
pub mod features;
pub mod interaction;
pub mod similarity;

pub use catalog::{Book, BookId, Catalog, Rating, UserId};
pub use engine::results::{EngineStats, Lookup, ScoredBook, SimilarUser};
pub use engine::{Recommender, CONTENT_WEIGHT, RATING_WEIGHT, TOP_K};
pub use error::{Error, Result};
