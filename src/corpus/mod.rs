//! Corpus provider.
//!
//! A [`Corpus`] is a single ordered listing of documents split in two by a
//! split index: training documents come first (indices below the split),
//! test documents follow. Both halves keep the order they were discovered in,
//! so every view handed to a classifier (documents, labels, file names) lines
//! up index by index.
//!
//! On disk the corpus follows the directory convention
//!
//! ```text
//! <input>/train/<class>/<file>
//! <input>/test/<class>/<file>   (ground truth known)
//! <input>/test/<file>           (ground truth unknown)
//! ```

mod loader;

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::Analyzer;
use crate::error::{ClassifyError, Result};

pub use loader::CorpusLoader;

/// A tokenized document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Path relative to the corpus root, used as the document identifier.
    pub name: String,
    /// Normalized tokens in reading order; duplicates are preserved.
    pub tokens: Vec<String>,
    /// Ground-truth class, if known.
    pub label: Option<String>,
}

impl Document {
    /// Create a document from already analyzed tokens.
    pub fn new<S: Into<String>>(name: S, tokens: Vec<String>, label: Option<String>) -> Self {
        Document {
            name: name.into(),
            tokens,
            label,
        }
    }

    /// Create a document by splitting pre-normalized text on whitespace.
    pub fn from_text<S: Into<String>>(name: S, text: &str, label: Option<&str>) -> Self {
        Document {
            name: name.into(),
            tokens: text.split_whitespace().map(str::to_string).collect(),
            label: label.map(str::to_string),
        }
    }

    /// The ground-truth label as a string slice.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

/// An ordered corpus split into training and test documents.
#[derive(Debug, Clone)]
pub struct Corpus {
    documents: Vec<Document>,
    split: usize,
}

impl Corpus {
    /// Build a corpus from its two halves.
    ///
    /// Every training document must carry a label, and neither half may be
    /// empty.
    pub fn new(training: Vec<Document>, test: Vec<Document>) -> Result<Self> {
        if training.is_empty() {
            return Err(ClassifyError::data("the corpus has no training documents"));
        }
        if test.is_empty() {
            return Err(ClassifyError::data("the corpus has no test documents"));
        }
        if let Some(doc) = training.iter().find(|doc| doc.label.is_none()) {
            return Err(ClassifyError::data(format!(
                "training document {} has no class label",
                doc.name
            )));
        }

        let split = training.len();
        let mut documents = training;
        documents.extend(test);

        Ok(Corpus { documents, split })
    }

    /// Load the corpus rooted at `input_dir`, analyzing every file with
    /// `analyzer`.
    pub fn load<P: AsRef<Path>>(input_dir: P, analyzer: Arc<dyn Analyzer>) -> Result<Self> {
        CorpusLoader::new(analyzer).load(input_dir)
    }

    /// All documents, training first.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Index of the first test document.
    pub fn split_index(&self) -> usize {
        self.split
    }

    /// Total number of documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the corpus holds no documents. Always false for a constructed corpus.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Training documents.
    pub fn training(&self) -> &[Document] {
        &self.documents[..self.split]
    }

    /// Test documents.
    pub fn test(&self) -> &[Document] {
        &self.documents[self.split..]
    }

    /// Labels parallel to [`documents`](Self::documents).
    pub fn labels(&self) -> Vec<Option<&str>> {
        self.documents.iter().map(Document::label).collect()
    }

    /// Training labels, parallel to [`training`](Self::training).
    pub fn training_labels(&self) -> Vec<&str> {
        self.training()
            .iter()
            .map(|doc| doc.label().unwrap_or_default())
            .collect()
    }

    /// Document names parallel to [`documents`](Self::documents).
    pub fn file_names(&self) -> Vec<&str> {
        self.documents.iter().map(|doc| doc.name.as_str()).collect()
    }

    /// Distinct training labels in sorted order.
    pub fn class_set(&self) -> Vec<String> {
        let mut classes: Vec<String> = self
            .training()
            .iter()
            .filter_map(|doc| doc.label.clone())
            .collect();
        classes.sort();
        classes.dedup();
        classes
    }

    /// Summary statistics for reporting.
    pub fn stats(&self) -> CorpusStats {
        let mut training_per_class = BTreeMap::new();
        for label in self.training_labels() {
            *training_per_class.entry(label.to_string()).or_insert(0) += 1;
        }

        let mut vocabulary: Vec<&str> = self
            .documents
            .iter()
            .flat_map(|doc| doc.tokens.iter().map(String::as_str))
            .collect();
        vocabulary.sort_unstable();
        vocabulary.dedup();

        CorpusStats {
            training_documents: self.split,
            test_documents: self.documents.len() - self.split,
            labeled_test_documents: self.test().iter().filter(|doc| doc.label.is_some()).count(),
            training_per_class,
            vocabulary_size: vocabulary.len(),
        }
    }
}

/// Corpus statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusStats {
    pub training_documents: usize,
    pub test_documents: usize,
    pub labeled_test_documents: usize,
    pub training_per_class: BTreeMap<String, usize>,
    pub vocabulary_size: usize,
}
