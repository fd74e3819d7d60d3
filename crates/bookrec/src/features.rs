//! TF-IDF feature vectors for catalog books.
//!
//! Weighting:
//! ```text
//! tfidf(t, d) = tf(t, d) × idf(t)
//! tf(t, d)    = count of term t in document d
//! idf(t)      = ln((1 + n) / (1 + df(t))) + 1
//! ```
//! where `n` is the number of books and `df(t)` the number of books containing `t`.
//! Every row is L2-normalized afterwards, so cosine similarity between rows is a dot
//! product. Vocabulary columns are assigned in lexicographic term order.

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use ndarray::{Array2, ArrayView1};
use regex::Regex;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::OnceLock;
use tracing::debug;

/// Split text into lowercase terms of at least two word characters.
pub fn tokenize(text: &str) -> Vec<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\b\w\w+\b").expect("token regex is valid"));

    let lowered = text.to_lowercase();
    re.find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// One TF-IDF vector per book, all sharing the learned vocabulary.
#[derive(Debug, Clone)]
pub struct FeatureMatrix {
    vocabulary: Vec<String>,
    idf: Vec<f64>,
    /// books × vocabulary, rows in catalog order
    vectors: Array2<f64>,
}

impl FeatureMatrix {
    /// Learn the vocabulary from every book's feature text and weight it.
    pub fn build(catalog: &Catalog) -> Result<Self> {
        if catalog.is_empty() {
            return Err(Error::EmptyCatalog);
        }

        let documents: Vec<Vec<String>> = catalog
            .books()
            .iter()
            .map(|book| tokenize(&book.features()))
            .collect();

        // BTreeMap keeps terms sorted, which fixes the column order
        let mut doc_freq: BTreeMap<&str, usize> = BTreeMap::new();
        for tokens in &documents {
            let unique: HashSet<&str> = tokens.iter().map(String::as_str).collect();
            for term in unique {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        if doc_freq.is_empty() {
            return Err(Error::EmptyVocabulary);
        }

        let n = documents.len() as f64;
        let vocabulary: Vec<String> = doc_freq.keys().map(|t| t.to_string()).collect();
        let idf: Vec<f64> = doc_freq
            .values()
            .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();
        let columns: HashMap<&str, usize> = vocabulary
            .iter()
            .enumerate()
            .map(|(col, term)| (term.as_str(), col))
            .collect();

        let mut vectors = Array2::<f64>::zeros((documents.len(), vocabulary.len()));
        for (row, tokens) in documents.iter().enumerate() {
            for token in tokens {
                if let Some(&col) = columns.get(token.as_str()) {
                    vectors[[row, col]] += 1.0;
                }
            }
        }

        for mut row in vectors.rows_mut() {
            for (value, weight) in row.iter_mut().zip(idf.iter()) {
                *value *= weight;
            }
            let norm: f64 = row.iter().map(|v| v * v).sum::<f64>().sqrt();
            if norm > 0.0 {
                row.mapv_inplace(|v| v / norm);
            }
        }

        debug!(
            books = documents.len(),
            vocabulary = vocabulary.len(),
            "built tf-idf features"
        );

        Ok(Self {
            vocabulary,
            idf,
            vectors,
        })
    }

    /// Learned terms, in column order.
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Inverse document frequency per column.
    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    /// The full books × vocabulary matrix.
    pub fn vectors(&self) -> &Array2<f64> {
        &self.vectors
    }

    /// Feature vector of the book at a catalog row.
    pub fn row(&self, row: usize) -> ArrayView1<'_, f64> {
        self.vectors.row(row)
    }

    /// Vocabulary size.
    pub fn dim(&self) -> usize {
        self.vocabulary.len()
    }

    /// Column of a term, if it was learned.
    pub fn column(&self, term: &str) -> Option<usize> {
        self.vocabulary
            .binary_search_by(|t| t.as_str().cmp(term))
            .ok()
    }
}
