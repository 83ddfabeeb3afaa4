//! # textclass
//!
//! Text classification over a directory corpus with four classifiers built
//! from first principles.
//!
//! ## Features
//!
//! - Multinomial Naive Bayes over word counts
//! - Rocchio (nearest class centroid) over TF-IDF vectors
//! - K nearest neighbors over TF-IDF vectors
//! - ID3 decision tree over word presence
//! - Configurable analysis pipeline (tokenizers, lowercasing, stop words)
//! - `;`-delimited diagnostic artifacts per method
//!
//! ## Example
//!
//! ```no_run
//! use textclass::config::{ClassificationConfig, Method};
//! use textclass::engine::ClassificationEngine;
//!
//! let config = ClassificationConfig::new("corpus", "output", Method::NaiveBayes);
//! let summary = ClassificationEngine::new(config).run()?;
//! println!("accuracy: {:?}", summary.accuracy);
//! # Ok::<(), textclass::error::ClassifyError>(())
//! ```

pub mod analysis;
pub mod classify;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod neighbors;
pub mod progress;
pub mod report;
pub mod vectorize;

pub mod prelude {
    pub use crate::classify::{Classifier, Prediction};
    pub use crate::config::{ClassificationConfig, Method, NormalizerMode};
    pub use crate::corpus::{Corpus, Document};
    pub use crate::engine::{ClassificationEngine, RunSummary};
    pub use crate::error::{ClassifyError, Result};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
