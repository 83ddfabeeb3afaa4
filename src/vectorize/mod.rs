//! Feature extraction over tokenized documents.
//!
//! - [`word_count`] - term → occurrence maps used by Naive Bayes
//! - [`tfidf`] - dense TF-IDF matrices used by Rocchio and KNN

pub mod tfidf;
pub mod word_count;

pub use tfidf::{TfIdfMatrix, TfIdfVectorizer};
pub use word_count::count_words;
