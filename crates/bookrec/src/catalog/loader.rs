//! Load the books and ratings tables from CSV.

use super::{Book, Catalog, Rating};
use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::info;

const BOOKS_TABLE: &str = "books";
const RATINGS_TABLE: &str = "ratings";

impl Catalog {
    /// Read `books.csv` (`Book_ID,Title,Author,Genre`) and `ratings.csv`
    /// (`User_ID,Book_ID,Rating`) from disk.
    ///
    /// `Book_ID` and `User_ID` must be unsigned integers; ids such as `B001` fail
    /// with [`Error::Csv`], and `007` reads as the same id as `7`. A blank `Rating`
    /// cell is kept as an unscored event.
    pub fn from_csv_paths(books: impl AsRef<Path>, ratings: impl AsRef<Path>) -> Result<Self> {
        let books_path = books.as_ref();
        let ratings_path = ratings.as_ref();

        let books_file = open(books_path)?;
        let ratings_file = open(ratings_path)?;
        let catalog = Self::from_csv_readers(books_file, ratings_file)?;

        info!(
            books = catalog.books().len(),
            ratings = catalog.ratings().len(),
            "loaded catalog from {} and {}",
            books_path.display(),
            ratings_path.display()
        );
        Ok(catalog)
    }

    /// Parse both tables from arbitrary readers.
    pub fn from_csv_readers(books: impl Read, ratings: impl Read) -> Result<Self> {
        let books: Vec<Book> = read_table(books, BOOKS_TABLE)?;
        let ratings: Vec<Rating> = read_table(ratings, RATINGS_TABLE)?;
        Ok(Self::new(books, ratings))
    }
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_table<T: DeserializeOwned>(reader: impl Read, table: &'static str) -> Result<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    reader
        .deserialize()
        .collect::<std::result::Result<Vec<T>, csv::Error>>()
        .map_err(|source| Error::Csv { table, source })
}
