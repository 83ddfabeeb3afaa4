//! Binary presence features for ID3.

use ahash::{AHashMap, AHashSet};
use bit_vec::BitVec;

use crate::corpus::Document;
use crate::error::{ClassifyError, Result};

/// The sorted term vocabulary and the layout of a feature row.
///
/// A row has one bit per vocabulary term (set when the term occurs in the
/// document) followed by the class bit.
#[derive(Debug, Clone)]
pub struct FeatureSpace {
    vocabulary: Vec<String>,
    index: AHashMap<String, usize>,
}

impl FeatureSpace {
    /// Build the vocabulary from the distinct terms of `documents`.
    pub fn from_documents(documents: &[Document]) -> Result<Self> {
        let terms: AHashSet<&str> = documents
            .iter()
            .flat_map(|doc| doc.tokens.iter().map(String::as_str))
            .collect();
        if terms.is_empty() {
            return Err(ClassifyError::data("ID3 vocabulary is empty"));
        }

        let mut vocabulary: Vec<String> = terms.into_iter().map(str::to_string).collect();
        vocabulary.sort();
        let index = vocabulary
            .iter()
            .enumerate()
            .map(|(i, term)| (term.clone(), i))
            .collect();

        Ok(FeatureSpace { vocabulary, index })
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Term of attribute column `attribute`.
    pub fn term(&self, attribute: usize) -> Option<&str> {
        self.vocabulary.get(attribute).map(String::as_str)
    }

    /// Index of the class column, `|vocabulary|`.
    pub fn class_column(&self) -> usize {
        self.vocabulary.len()
    }

    /// Number of columns in a row, `|vocabulary| + 1`.
    pub fn width(&self) -> usize {
        self.vocabulary.len() + 1
    }

    /// Presence row for `tokens` with the given class bit. Terms outside the
    /// vocabulary are ignored.
    pub fn row<S: AsRef<str>>(&self, tokens: &[S], class_bit: bool) -> BitVec {
        let mut row = BitVec::from_elem(self.width(), false);
        for token in tokens {
            if let Some(&column) = self.index.get(token.as_ref()) {
                row.set(column, true);
            }
        }
        row.set(self.class_column(), class_bit);
        row
    }
}
