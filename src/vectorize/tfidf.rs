//! TF-IDF vectorizer over tokenized documents.
//!
//! Term frequency is normalized by document length and weighted by a smoothed
//! inverse document frequency, `ln((N + 1) / (df + 1)) + 1`. The vocabulary is
//! sorted lexicographically so matrix columns are stable across runs.

use ahash::{AHashMap, AHashSet};

use crate::corpus::Document;
use crate::error::{ClassifyError, Result};

/// A dense TF-IDF matrix, rows training-then-test, columns per `vocabulary`.
#[derive(Debug, Clone, PartialEq)]
pub struct TfIdfMatrix {
    /// Column terms in sorted order.
    pub vocabulary: Vec<String>,
    /// One row per document.
    pub rows: Vec<Vec<f64>>,
}

impl TfIdfMatrix {
    /// Split the rows at `index`, mirroring a corpus split.
    pub fn split_at(&self, index: usize) -> (&[Vec<f64>], &[Vec<f64>]) {
        self.rows.split_at(index)
    }
}

/// TF-IDF vectorizer for text feature extraction.
#[derive(Debug, Clone, Default)]
pub struct TfIdfVectorizer {
    /// Sorted vocabulary.
    vocabulary: Vec<String>,
    /// Term -> column index.
    index: AHashMap<String, usize>,
    /// Inverse document frequency for each column.
    idf: Vec<f64>,
    /// Total number of documents seen during fitting.
    n_documents: usize,
}

impl TfIdfVectorizer {
    /// Create an unfitted vectorizer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fit the vocabulary and IDF weights on the given documents.
    pub fn fit<S: AsRef<str>>(&mut self, documents: &[&[S]]) -> Result<()> {
        let mut document_frequency: AHashMap<&str, usize> = AHashMap::new();

        for tokens in documents {
            let unique: AHashSet<&str> = tokens.iter().map(|t| t.as_ref()).collect();
            for term in unique {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        if document_frequency.is_empty() {
            return Err(ClassifyError::data("TF-IDF vocabulary is empty"));
        }

        let mut vocabulary: Vec<String> = document_frequency.keys().map(|t| t.to_string()).collect();
        vocabulary.sort();

        let n_documents = documents.len() as f64;
        self.idf = vocabulary
            .iter()
            .map(|term| {
                let df = document_frequency[term.as_str()] as f64;
                ((n_documents + 1.0) / (df + 1.0)).ln() + 1.0
            })
            .collect();
        self.index = vocabulary
            .iter()
            .enumerate()
            .map(|(i, term)| (term.clone(), i))
            .collect();
        self.vocabulary = vocabulary;
        self.n_documents = documents.len();

        Ok(())
    }

    /// Transform a token sequence into a TF-IDF feature vector.
    ///
    /// Terms outside the fitted vocabulary are ignored but still count
    /// towards the document length.
    pub fn transform<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<f64> {
        let mut tf = vec![0.0; self.vocabulary.len()];

        for token in tokens {
            if let Some(&idx) = self.index.get(token.as_ref()) {
                tf[idx] += 1.0;
            }
        }

        let doc_length = tokens.len() as f64;
        if doc_length > 0.0 {
            for count in &mut tf {
                *count /= doc_length;
            }
        }

        for (idx, value) in tf.iter_mut().enumerate() {
            *value *= self.idf[idx];
        }

        tf
    }

    /// Fit on the combined corpus and return the full matrix.
    pub fn fit_transform(training: &[Document], test: &[Document]) -> Result<TfIdfMatrix> {
        let documents: Vec<&[String]> = training
            .iter()
            .chain(test.iter())
            .map(|doc| doc.tokens.as_slice())
            .collect();

        let mut vectorizer = TfIdfVectorizer::new();
        vectorizer.fit(&documents)?;

        let rows = documents.iter().map(|&tokens| vectorizer.transform(tokens)).collect();

        Ok(TfIdfMatrix {
            vocabulary: vectorizer.vocabulary,
            rows,
        })
    }

    /// The fitted vocabulary, sorted.
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Get the size of the vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Number of documents the vectorizer was fitted on.
    pub fn n_documents(&self) -> usize {
        self.n_documents
    }
}
