//! Catalog store: the immutable books and rating events of one session.
//!
//! Titles are a lookup key even though they are not required to be unique.
//! When several rows share a title the first row in catalog order wins.

pub mod loader;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::warn;

/// Identifier of a book (`Book_ID`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(pub u64);

/// Identifier of a user (`User_ID`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for BookId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A single book record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    #[serde(rename = "Book_ID")]
    pub id: BookId,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Author", default)]
    pub author: String,
    #[serde(rename = "Genre", default)]
    pub genre: String,
}

impl Book {
    pub fn new(
        id: impl Into<BookId>,
        title: impl Into<String>,
        author: impl Into<String>,
        genre: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            genre: genre.into(),
        }
    }

    /// Text blob the content features are learned from: title, author and genre.
    pub fn features(&self) -> String {
        format!("{} {} {}", self.title, self.author, self.genre)
    }
}

/// One rating event from the ratings log.
///
/// A blank `Rating` cell loads as `None`. Blank and NaN values carry no signal
/// and are skipped when the interaction matrix is built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    #[serde(rename = "User_ID")]
    pub user_id: UserId,
    #[serde(rename = "Book_ID")]
    pub book_id: BookId,
    #[serde(rename = "Rating", default)]
    pub rating: Option<f64>,
}

impl Rating {
    pub fn new(user_id: impl Into<UserId>, book_id: impl Into<BookId>, rating: f64) -> Self {
        Self {
            user_id: user_id.into(),
            book_id: book_id.into(),
            rating: Some(rating),
        }
    }

    /// An event whose rating cell was left blank.
    pub fn unscored(user_id: impl Into<UserId>, book_id: impl Into<BookId>) -> Self {
        Self {
            user_id: user_id.into(),
            book_id: book_id.into(),
            rating: None,
        }
    }

    /// The rating value, if it carries a usable signal (present and not NaN).
    pub fn value(&self) -> Option<f64> {
        self.rating.filter(|v| !v.is_nan())
    }
}

/// Books and rating events for one session.
#[derive(Debug, Clone)]
pub struct Catalog {
    books: Vec<Book>,
    ratings: Vec<Rating>,
    /// title -> first catalog row carrying it
    title_index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog from already-parsed records.
    ///
    /// Empty inputs are accepted here; the recommender rejects them when it is built.
    pub fn new(books: Vec<Book>, ratings: Vec<Rating>) -> Self {
        let mut title_index = HashMap::with_capacity(books.len());
        for (row, book) in books.iter().enumerate() {
            if let Some(&first) = title_index.get(&book.title) {
                warn!(
                    title = %book.title,
                    first_row = first,
                    duplicate_row = row,
                    "duplicate title, lookups resolve to the first row"
                );
                continue;
            }
            title_index.insert(book.title.clone(), row);
        }

        Self {
            books,
            ratings,
            title_index,
        }
    }

    /// Books in catalog order.
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// Rating events in log order.
    pub fn ratings(&self) -> &[Rating] {
        &self.ratings
    }

    /// Book at a catalog row.
    pub fn book(&self, row: usize) -> Option<&Book> {
        self.books.get(row)
    }

    /// Catalog row of the first book with exactly this title.
    pub fn find_by_title(&self, title: &str) -> Option<usize> {
        self.title_index.get(title).copied()
    }

    /// Titles in catalog order, duplicates included.
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.books.iter().map(|b| b.title.as_str())
    }

    /// Smallest and largest user id seen in the ratings log.
    pub fn user_id_range(&self) -> Option<(UserId, UserId)> {
        let min = self.ratings.iter().map(|r| r.user_id).min()?;
        let max = self.ratings.iter().map(|r| r.user_id).max()?;
        Some((min, max))
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Catalog {
        Catalog::new(
            vec![
                Book::new(1, "Dune", "Frank Herbert", "SciFi"),
                Book::new(2, "Emma", "Jane Austen", "Romance"),
                Book::new(3, "Dune", "Brian Herbert", "SciFi"),
            ],
            vec![
                Rating::new(7, 1, 5.0),
                Rating::new(3, 2, 4.0),
                Rating::new(12, 3, 2.0),
            ],
        )
    }

    #[test]
    fn test_features_concatenation() {
        let book = Book::new(1, "Dune", "Frank Herbert", "SciFi");
        assert_eq!(book.features(), "Dune Frank Herbert SciFi");
    }

    #[test]
    fn test_duplicate_title_resolves_to_first_row() {
        let catalog = sample();
        assert_eq!(catalog.find_by_title("Dune"), Some(0));
        assert_eq!(catalog.find_by_title("Emma"), Some(1));
        assert_eq!(catalog.find_by_title("dune"), None);
    }

    #[test]
    fn test_titles_keep_catalog_order() {
        let catalog = sample();
        let titles: Vec<&str> = catalog.titles().collect();
        assert_eq!(titles, vec!["Dune", "Emma", "Dune"]);
    }

    #[test]
    fn test_user_id_range() {
        let catalog = sample();
        assert_eq!(catalog.user_id_range(), Some((UserId(3), UserId(12))));

        let empty = Catalog::new(Vec::new(), Vec::new());
        assert_eq!(empty.user_id_range(), None);
        assert!(empty.is_empty());
    }
}
