//! ID3 decision tree over word presence, for exactly two classes.
//!
//! Each document becomes a row of presence bits over the training vocabulary
//! plus a class bit (1 for the class that sorts first). A tree is induced
//! from the training rows by maximum information gain and test rows are
//! classified by walking it.

pub mod context;
pub mod features;
pub mod induction;
pub mod tree;

use bit_vec::BitVec;
use log::debug;

use crate::classify::{Classified, Classifier, Prediction};
use crate::config::Method;
use crate::corpus::Corpus;
use crate::error::Result;
use crate::report::Artifact;

pub use context::Id3Context;
pub use features::FeatureSpace;
pub use induction::{entropy, gain, induce};
pub use tree::DecisionTree;

/// The run context with the tree induced from it.
#[derive(Debug, Clone)]
pub struct Id3Model {
    pub context: Id3Context,
    pub tree: DecisionTree,
}

/// ID3 classifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct Id3Classifier;

impl Id3Classifier {
    pub fn new() -> Self {
        Id3Classifier
    }

    /// Induce a tree from the training rows of `context`.
    pub fn train(&self, context: &Id3Context) -> DecisionTree {
        let rows: Vec<&BitVec> = context.training_rows().iter().collect();
        induce(&rows, context.space())
    }
}

impl Classifier for Id3Classifier {
    type Model = Id3Model;
    /// Class bit per test document.
    type Details = Vec<bool>;

    fn method(&self) -> Method {
        Method::Id3
    }

    fn fit(&self, corpus: &Corpus) -> Result<Id3Model> {
        let context = Id3Context::new(corpus)?;
        let tree = self.train(&context);
        debug!(
            "ID3 tree induced: depth {}, {} leaves",
            tree.depth(),
            tree.leaf_count()
        );
        Ok(Id3Model { context, tree })
    }

    fn predict(&self, model: &Id3Model, corpus: &Corpus) -> Result<Classified<Self::Details>> {
        let bits: Vec<bool> = model
            .context
            .test_rows()
            .iter()
            .map(|row| model.tree.classify(row))
            .collect();

        let predictions = corpus
            .test()
            .iter()
            .zip(bits.iter())
            .map(|(doc, &bit)| Prediction::new(doc.name.clone(), model.context.class_name(bit), doc.label.clone()))
            .collect();

        Ok(Classified {
            predictions,
            details: bits,
        })
    }

    fn artifacts(
        &self,
        model: &Id3Model,
        _corpus: &Corpus,
        classified: &Classified<Self::Details>,
    ) -> Vec<Artifact> {
        vec![
            Artifact::text("tree.txt", model.tree.to_outline()),
            Artifact::text("result.txt", result_listing(model, classified)),
        ]
    }
}

/// Test file names grouped by predicted class, positive class first:
/// `a.txt b.txt - china`. Empty groups are omitted.
fn result_listing(model: &Id3Model, classified: &Classified<Vec<bool>>) -> String {
    let mut out = String::new();
    for class_bit in [true, false] {
        let names: Vec<&str> = classified
            .predictions
            .iter()
            .zip(classified.details.iter())
            .filter(|&(_, &bit)| bit == class_bit)
            .map(|(prediction, _)| base_name(&prediction.document))
            .collect();
        if names.is_empty() {
            continue;
        }
        out.push_str(&format!("{} - {}\n", names.join(" "), model.context.class_name(class_bit)));
    }
    out
}

fn base_name(document: &str) -> &str {
    document.rsplit('/').next().unwrap_or(document)
}
