//! Dense user × book rating grid.
//!
//! Rows are the distinct rating users in ascending id order. Columns are the
//! distinct book ids in ascending order, taken from both the ratings log and the
//! catalog, so a catalog book nobody rated still owns an all-zero column. A missing
//! rating is stored as 0.0, which doubles as "no signal".

use crate::catalog::{BookId, Catalog, UserId};
use crate::error::{Error, Result};
use ndarray::{Array1, Array2, ArrayView1};
use std::collections::{BTreeSet, HashMap, HashSet};
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct InteractionMatrix {
    users: Vec<UserId>,
    books: Vec<BookId>,
    user_index: HashMap<UserId, usize>,
    book_index: HashMap<BookId, usize>,
    grid: Array2<f64>,
}

impl InteractionMatrix {
    /// Pivot the ratings log into the grid.
    ///
    /// Duplicate (user, book) events collapse to the last one in log order.
    /// Events with a blank or NaN rating are skipped, so a user whose every event
    /// is unscored gets no row. An infinite rating is rejected.
    pub fn build(catalog: &Catalog) -> Result<Self> {
        let ratings = catalog.ratings();
        if ratings.is_empty() {
            return Err(Error::EmptyRatings);
        }

        let mut events: Vec<(UserId, BookId, f64)> = Vec::with_capacity(ratings.len());
        for rating in ratings {
            match rating.value() {
                Some(value) if value.is_infinite() => {
                    return Err(Error::NonFiniteRating {
                        user: rating.user_id,
                        book: rating.book_id,
                        value,
                    });
                }
                Some(value) => events.push((rating.user_id, rating.book_id, value)),
                None => {}
            }
        }

        let skipped = ratings.len() - events.len();
        if skipped > 0 {
            warn!(skipped, "rating events without a usable value ignored");
        }
        if events.is_empty() {
            return Err(Error::EmptyRatings);
        }

        let users: Vec<UserId> = events
            .iter()
            .map(|&(user, _, _)| user)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let books: Vec<BookId> = events
            .iter()
            .map(|&(_, book, _)| book)
            .chain(catalog.books().iter().map(|b| b.id))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let user_index: HashMap<UserId, usize> =
            users.iter().enumerate().map(|(row, &u)| (u, row)).collect();
        let book_index: HashMap<BookId, usize> =
            books.iter().enumerate().map(|(col, &b)| (b, col)).collect();

        let mut grid = Array2::<f64>::zeros((users.len(), books.len()));
        let mut seen: HashSet<(UserId, BookId)> = HashSet::with_capacity(events.len());
        let mut overwritten = 0usize;

        for &(user, book, value) in &events {
            let row = user_index[&user];
            let col = book_index[&book];
            if !seen.insert((user, book)) {
                overwritten += 1;
            }
            grid[[row, col]] = value;
        }

        if overwritten > 0 {
            warn!(
                overwritten,
                "duplicate rating events collapsed, last event per user and book wins"
            );
        }
        debug!(
            users = users.len(),
            books = books.len(),
            events = events.len(),
            "built interaction matrix"
        );

        Ok(Self {
            users,
            books,
            user_index,
            book_index,
            grid,
        })
    }

    /// Row labels, ascending.
    pub fn users(&self) -> &[UserId] {
        &self.users
    }

    /// Column labels, ascending.
    pub fn books(&self) -> &[BookId] {
        &self.books
    }

    /// The raw users × books grid.
    pub fn grid(&self) -> &Array2<f64> {
        &self.grid
    }

    pub fn contains_user(&self, user: UserId) -> bool {
        self.user_index.contains_key(&user)
    }

    /// A user's ratings in column order.
    pub fn user_row(&self, user: UserId) -> Option<ArrayView1<'_, f64>> {
        let row = *self.user_index.get(&user)?;
        Some(self.grid.row(row))
    }

    /// A single cell. `None` for an unknown user; 0.0 for a book the user never rated
    /// or a book that has no column at all.
    pub fn rating(&self, user: UserId, book: BookId) -> Option<f64> {
        let row = *self.user_index.get(&user)?;
        Some(
            self.book_index
                .get(&book)
                .map_or(0.0, |&col| self.grid[[row, col]]),
        )
    }

    /// Reindex a user's row onto an arbitrary book order, filling gaps with 0.0.
    ///
    /// The grid's own column order is ascending book id, which generally differs
    /// from catalog order, so every consumer that mixes a rating row with a
    /// catalog-ordered vector must go through here.
    pub fn aligned_row<I>(&self, user: UserId, books: I) -> Option<Array1<f64>>
    where
        I: IntoIterator<Item = BookId>,
    {
        let row = self.grid.row(*self.user_index.get(&user)?);
        Some(
            books
                .into_iter()
                .map(|book| self.book_index.get(&book).map_or(0.0, |&col| row[col]))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Book, Rating};

    fn catalog() -> Catalog {
        Catalog::new(
            vec![
                Book::new(30, "Gamma", "Author C", "Drama"),
                Book::new(10, "Alpha", "Author A", "Drama"),
                Book::new(40, "Delta", "Author D", "Drama"),
            ],
            vec![
                Rating::new(2, 10, 4.0),
                Rating::new(1, 30, 5.0),
                Rating::new(2, 20, 3.0),
                Rating::new(2, 10, 1.0),
            ],
        )
    }

    #[test]
    fn test_rows_and_columns_are_sorted() {
        let m = InteractionMatrix::build(&catalog()).expect("build");
        assert_eq!(m.users(), &[UserId(1), UserId(2)]);
        // 20 is only rated, 40 is only in the catalog
        assert_eq!(m.books(), &[BookId(10), BookId(20), BookId(30), BookId(40)]);
        assert_eq!(m.grid().dim(), (2, 4));
    }

    #[test]
    fn test_last_duplicate_wins() {
        let m = InteractionMatrix::build(&catalog()).expect("build");
        assert_eq!(m.rating(UserId(2), BookId(10)), Some(1.0));
    }

    #[test]
    fn test_missing_cells_are_zero() {
        let m = InteractionMatrix::build(&catalog()).expect("build");
        assert_eq!(m.rating(UserId(1), BookId(10)), Some(0.0));
        assert_eq!(m.rating(UserId(1), BookId(40)), Some(0.0));
        assert_eq!(m.rating(UserId(1), BookId(999)), Some(0.0));
        assert_eq!(m.rating(UserId(7), BookId(10)), None);

        let nonzero = m.grid().iter().filter(|&&v| v != 0.0).count();
        assert_eq!(nonzero, 3);
    }

    #[test]
    fn test_aligned_row_follows_requested_order() {
        let catalog = catalog();
        let m = InteractionMatrix::build(&catalog).expect("build");

        let catalog_order = catalog.books().iter().map(|b| b.id);
        let aligned = m.aligned_row(UserId(2), catalog_order).expect("known user");
        // catalog order is 30, 10, 40
        assert_eq!(aligned.to_vec(), vec![0.0, 1.0, 0.0]);

        let raw = m.user_row(UserId(2)).expect("known user");
        assert_eq!(raw.to_vec(), vec![1.0, 3.0, 0.0, 0.0]);

        assert!(m.aligned_row(UserId(9), [BookId(10)]).is_none());
    }

    #[test]
    fn test_unscored_events_are_skipped() {
        let catalog = Catalog::new(
            vec![Book::new(10, "Alpha", "Author A", "Drama")],
            vec![
                Rating::new(1, 10, f64::NAN),
                Rating::new(1, 20, 4.0),
                Rating::unscored(3, 10),
                Rating::new(2, 20, 5.0),
            ],
        );
        let m = InteractionMatrix::build(&catalog).expect("build");

        // user 3 only has a blank rating, so it never becomes a row
        assert_eq!(m.users(), &[UserId(1), UserId(2)]);
        assert!(m.contains_user(UserId(1)));
        assert!(!m.contains_user(UserId(3)));
        assert_eq!(m.rating(UserId(1), BookId(10)), Some(0.0));
        assert_eq!(m.rating(UserId(1), BookId(20)), Some(4.0));
        assert!(m.grid().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_unscored_event_does_not_overwrite_earlier_rating() {
        let catalog = Catalog::new(
            vec![Book::new(10, "Alpha", "Author A", "Drama")],
            vec![Rating::new(1, 10, 3.0), Rating::new(1, 10, f64::NAN)],
        );
        let m = InteractionMatrix::build(&catalog).expect("build");
        assert_eq!(m.rating(UserId(1), BookId(10)), Some(3.0));
    }

    #[test]
    fn test_infinite_rating_is_rejected() {
        let catalog = Catalog::new(
            vec![Book::new(10, "Alpha", "Author A", "Drama")],
            vec![Rating::new(1, 10, 4.0), Rating::new(2, 10, f64::NEG_INFINITY)],
        );
        let err = InteractionMatrix::build(&catalog).unwrap_err();
        assert!(matches!(
            err,
            Error::NonFiniteRating {
                user: UserId(2),
                book: BookId(10),
                ..
            }
        ));
    }

    #[test]
    fn test_only_unscored_events_count_as_empty() {
        let catalog = Catalog::new(
            vec![Book::new(10, "Alpha", "Author A", "Drama")],
            vec![Rating::unscored(1, 10), Rating::new(2, 10, f64::NAN)],
        );
        let err = InteractionMatrix::build(&catalog).unwrap_err();
        assert!(matches!(err, Error::EmptyRatings));
    }

    #[test]
    fn test_empty_ratings_fail() {
        let catalog = Catalog::new(vec![Book::new(1, "Alpha", "A", "B")], Vec::new());
        let err = InteractionMatrix::build(&catalog).unwrap_err();
        assert!(matches!(err, Error::EmptyRatings));
    }
}
