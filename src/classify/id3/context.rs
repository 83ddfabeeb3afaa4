//! Per-run ID3 state.

use bit_vec::BitVec;

use crate::classify::id3::features::FeatureSpace;
use crate::corpus::Corpus;
use crate::error::{ClassifyError, Result};

/// Everything one ID3 run works on, built once from the corpus.
///
/// The first class in sort order is the positive class (class bit 1). Only
/// training documents contribute to the vocabulary and the training rows.
#[derive(Debug, Clone)]
pub struct Id3Context {
    positive_class: String,
    negative_class: String,
    space: FeatureSpace,
    /// Training rows in corpus order.
    training_rows: Vec<BitVec>,
    /// Names of positive training documents.
    positive_names: Vec<String>,
    /// Names of negative training documents.
    negative_names: Vec<String>,
    /// Test rows in corpus order. The class bit is set for known positive
    /// documents and never read by induction.
    test_rows: Vec<BitVec>,
    test_names: Vec<String>,
}

impl Id3Context {
    /// Build the context for a two-class corpus.
    pub fn new(corpus: &Corpus) -> Result<Self> {
        let classes = corpus.class_set();
        let [positive_class, negative_class]: [String; 2] = classes.try_into().map_err(|classes: Vec<String>| {
            ClassifyError::data(format!(
                "ID3 requires exactly 2 classes, found {}",
                classes.len()
            ))
        })?;

        let space = FeatureSpace::from_documents(corpus.training())?;

        let mut training_rows = Vec::with_capacity(corpus.training().len());
        let mut positive_names = Vec::new();
        let mut negative_names = Vec::new();
        for doc in corpus.training() {
            let positive = doc.label() == Some(positive_class.as_str());
            training_rows.push(space.row(&doc.tokens, positive));
            if positive {
                positive_names.push(doc.name.clone());
            } else {
                negative_names.push(doc.name.clone());
            }
        }

        let test_rows = corpus
            .test()
            .iter()
            .map(|doc| space.row(&doc.tokens, doc.label() == Some(positive_class.as_str())))
            .collect();
        let test_names = corpus.test().iter().map(|doc| doc.name.clone()).collect();

        Ok(Id3Context {
            positive_class,
            negative_class,
            space,
            training_rows,
            positive_names,
            negative_names,
            test_rows,
            test_names,
        })
    }

    pub fn positive_class(&self) -> &str {
        &self.positive_class
    }

    pub fn negative_class(&self) -> &str {
        &self.negative_class
    }

    /// Class name of a class bit.
    pub fn class_name(&self, class_bit: bool) -> &str {
        if class_bit {
            &self.positive_class
        } else {
            &self.negative_class
        }
    }

    pub fn space(&self) -> &FeatureSpace {
        &self.space
    }

    pub fn training_rows(&self) -> &[BitVec] {
        &self.training_rows
    }

    pub fn positive_names(&self) -> &[String] {
        &self.positive_names
    }

    pub fn negative_names(&self) -> &[String] {
        &self.negative_names
    }

    pub fn test_rows(&self) -> &[BitVec] {
        &self.test_rows
    }

    pub fn test_names(&self) -> &[String] {
        &self.test_names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Document;

    #[test]
    fn test_context_splits_classes() {
        let corpus = Corpus::new(
            vec![
                Document::from_text("train/other/1", "x", Some("other")),
                Document::from_text("train/china/2", "a", Some("china")),
            ],
            vec![
                Document::from_text("test/3", "a q", None),
                Document::from_text("test/china/4", "x", Some("china")),
                Document::from_text("test/other/5", "a", Some("other")),
            ],
        )
        .unwrap();
        let context = Id3Context::new(&corpus).unwrap();

        assert_eq!(context.positive_class(), "china");
        assert_eq!(context.negative_class(), "other");
        assert_eq!(context.positive_names(), &["train/china/2"]);
        assert_eq!(context.negative_names(), &["train/other/1"]);
        assert_eq!(context.space().vocabulary(), &["a", "x"]);
        assert!(context.training_rows()[1][2]);
        assert!(!context.training_rows()[0][2]);
        assert!(context.test_rows()[0][0]);
        assert_eq!(context.test_names(), &["test/3", "test/china/4", "test/other/5"]);
    }

    #[test]
    fn test_test_rows_carry_known_class_bit() {
        let corpus = Corpus::new(
            vec![
                Document::from_text("train/other/1", "x", Some("other")),
                Document::from_text("train/china/2", "a", Some("china")),
            ],
            vec![
                Document::from_text("test/3", "a", None),
                Document::from_text("test/china/4", "x", Some("china")),
                Document::from_text("test/other/5", "a", Some("other")),
            ],
        )
        .unwrap();
        let context = Id3Context::new(&corpus).unwrap();
        let class_column = context.space().class_column();

        let bits: Vec<bool> = context.test_rows().iter().map(|row| row[class_column]).collect();
        assert_eq!(bits, vec![false, true, false]);
    }

    #[test]
    fn test_requires_two_classes() {
        let corpus = Corpus::new(
            vec![
                Document::from_text("1", "a", Some("x")),
                Document::from_text("2", "b", Some("y")),
                Document::from_text("3", "c", Some("z")),
            ],
            vec![Document::from_text("4", "a", None)],
        )
        .unwrap();
        assert!(matches!(Id3Context::new(&corpus), Err(ClassifyError::Data(_))));
    }
}
