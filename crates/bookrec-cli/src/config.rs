//! Session configuration: where the two input tables live.

use anyhow::{Context, Result};
use bookrec::{Catalog, Recommender};
use clap::Args;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// Input tables, from flags or `BOOKREC_*` environment variables.
#[derive(Debug, Clone, Args)]
pub struct Config {
    /// Books table (Book_ID,Title,Author,Genre)
    #[arg(long, env = "BOOKREC_BOOKS", default_value = "books.csv", global = true)]
    pub books: PathBuf,

    /// Ratings table (User_ID,Book_ID,Rating)
    #[arg(long, env = "BOOKREC_RATINGS", default_value = "ratings.csv", global = true)]
    pub ratings: PathBuf,
}

impl Config {
    /// Load both tables and build every matrix.
    pub fn load_recommender(&self) -> Result<Recommender> {
        let start = Instant::now();
        let catalog = Catalog::from_csv_paths(&self.books, &self.ratings)
            .context("failed to load catalog")?;
        let recommender = Recommender::new(catalog).context("failed to build recommender")?;
        info!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            "session ready"
        );
        Ok(recommender)
    }
}
