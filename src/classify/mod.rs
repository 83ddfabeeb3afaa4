//! The four classifiers.
//!
//! Each classifier is independent of the others and runs in three phases the
//! engine drives one after another: [`fit`](Classifier::fit) builds the
//! features and the model from the corpus, [`predict`](Classifier::predict)
//! assigns one class to every test document, and
//! [`artifacts`](Classifier::artifacts) renders the diagnostics.

pub mod id3;
pub mod knn;
pub mod naive_bayes;
pub mod rocchio;

use serde::{Deserialize, Serialize};

use crate::config::Method;
use crate::corpus::Corpus;
use crate::error::Result;
use crate::report::Artifact;
use crate::vectorize::TfIdfMatrix;

pub use id3::Id3Classifier;
pub use knn::KnnClassifier;
pub use naive_bayes::NaiveBayesClassifier;
pub use rocchio::RocchioClassifier;

/// The class assigned to one test document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    /// Document name.
    pub document: String,
    /// Predicted class.
    pub predicted: String,
    /// Ground-truth class, if known.
    pub actual: Option<String>,
}

impl Prediction {
    pub fn new<D: Into<String>, P: Into<String>>(document: D, predicted: P, actual: Option<String>) -> Self {
        Prediction {
            document: document.into(),
            predicted: predicted.into(),
            actual,
        }
    }

    /// Whether the prediction matches a known ground truth.
    pub fn is_correct(&self) -> Option<bool> {
        self.actual.as_ref().map(|actual| *actual == self.predicted)
    }
}

/// Predictions plus the per-document details a classifier reports on.
#[derive(Debug, Clone, PartialEq)]
pub struct Classified<D> {
    /// One prediction per test document, in corpus order.
    pub predictions: Vec<Prediction>,
    /// Classifier specific diagnostics, parallel to `predictions`.
    pub details: D,
}

/// A classification algorithm split into engine-driven phases.
pub trait Classifier {
    /// State produced by fitting: features and learned parameters.
    type Model;

    /// Per-document diagnostics produced alongside the predictions.
    type Details;

    /// The method this classifier implements.
    fn method(&self) -> Method;

    /// Build features and learn the model from the training half of `corpus`.
    fn fit(&self, corpus: &Corpus) -> Result<Self::Model>;

    /// Assign a class to every test document of `corpus`.
    fn predict(&self, model: &Self::Model, corpus: &Corpus) -> Result<Classified<Self::Details>>;

    /// Render the diagnostic artifacts of a finished run.
    fn artifacts(
        &self,
        model: &Self::Model,
        corpus: &Corpus,
        classified: &Classified<Self::Details>,
    ) -> Vec<Artifact>;
}

/// Render a TF-IDF matrix: a vocabulary header, then one row per document
/// with its values, its label (empty when unknown) and its name.
pub(crate) fn tfidf_matrix_artifact(matrix: &TfIdfMatrix, corpus: &Corpus) -> Artifact {
    let header = std::iter::once(matrix.vocabulary.clone());
    let rows = matrix
        .rows
        .iter()
        .zip(corpus.documents())
        .map(|(row, doc)| {
            let mut fields: Vec<String> = row.iter().map(f64::to_string).collect();
            fields.push(doc.label().unwrap_or_default().to_string());
            fields.push(doc.name.clone());
            fields
        });
    Artifact::table("tfidf_matrix.csv", header.chain(rows))
}
