//! Multinomial Naive Bayes over word counts.
//!
//! For every class `c` the log10 score of a document with term counts
//! `counts` is
//!
//! ```text
//! log10(prior[c]) + Σ_w counts[w] * log10((wordCount[c][w] + 1) / (|V| + Lc))
//! ```
//!
//! where `V` is the training vocabulary and `Lc` the normalizer selected by
//! [`NormalizerMode`]. The predicted class is the highest score; a tie goes to
//! the class that sorts first.

use std::collections::BTreeMap;

use ahash::AHashMap;
use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::classify::{Classified, Classifier, Prediction};
use crate::config::{Method, NormalizerMode};
use crate::corpus::{Corpus, Document};
use crate::error::{ClassifyError, Result};
use crate::metrics::round_to;
use crate::report::Artifact;
use crate::vectorize::count_words;

/// Log score of one class for one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassScore {
    pub class: String,
    pub score: f64,
}

/// Word statistics learned from the training documents.
#[derive(Debug, Clone)]
pub struct NaiveBayesModel {
    /// Training vocabulary with total occurrences, sorted by term.
    vocabulary: BTreeMap<String, usize>,
    /// Class set in sorted order.
    classes: Vec<String>,
    /// Term occurrences per class, parallel to `classes`.
    word_counts: Vec<AHashMap<String, usize>>,
    /// Total word occurrences per class, parallel to `classes`.
    class_totals: Vec<usize>,
    /// Prior probability per class, parallel to `classes`.
    priors: Vec<f64>,
    normalizer: NormalizerMode,
    /// Word total of the last training document's class.
    last_class_total: usize,
}

impl NaiveBayesModel {
    /// Learn priors and word counts from labeled training documents.
    pub fn fit(training: &[Document], normalizer: NormalizerMode) -> Result<Self> {
        if training.is_empty() {
            return Err(ClassifyError::data("Naive Bayes needs at least one training document"));
        }

        let mut per_class: BTreeMap<String, (usize, AHashMap<String, usize>)> = BTreeMap::new();
        let mut vocabulary: BTreeMap<String, usize> = BTreeMap::new();

        for doc in training {
            let label = doc.label().ok_or_else(|| {
                ClassifyError::data(format!("training document {} has no class label", doc.name))
            })?;
            let (documents, counts) = per_class.entry(label.to_string()).or_default();
            *documents += 1;

            for (term, count) in count_words(&doc.tokens) {
                *counts.entry(term.clone()).or_insert(0) += count;
                *vocabulary.entry(term).or_insert(0) += count;
            }
        }

        if vocabulary.is_empty() {
            return Err(ClassifyError::data("Naive Bayes vocabulary is empty"));
        }

        let total_documents = training.len() as f64;
        let mut classes = Vec::with_capacity(per_class.len());
        let mut word_counts = Vec::with_capacity(per_class.len());
        let mut class_totals = Vec::with_capacity(per_class.len());
        let mut priors = Vec::with_capacity(per_class.len());

        for (class, (documents, counts)) in per_class {
            classes.push(class);
            class_totals.push(counts.values().sum());
            word_counts.push(counts);
            priors.push(documents as f64 / total_documents);
        }

        let last_class_total = training
            .last()
            .and_then(Document::label)
            .and_then(|label| classes.iter().position(|class| class == label))
            .map(|index| class_totals[index])
            .unwrap_or_default();

        debug!(
            "Naive Bayes fitted: {} classes, vocabulary of {}",
            classes.len(),
            vocabulary.len()
        );

        Ok(NaiveBayesModel {
            vocabulary,
            classes,
            word_counts,
            class_totals,
            priors,
            normalizer,
            last_class_total,
        })
    }

    /// Class set in sorted order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Prior probabilities, parallel to [`classes`](Self::classes).
    pub fn priors(&self) -> &[f64] {
        &self.priors
    }

    /// Training vocabulary with total occurrences.
    pub fn vocabulary(&self) -> &BTreeMap<String, usize> {
        &self.vocabulary
    }

    /// Number of distinct training terms, `|V|`.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Occurrences of `term` in training documents of `class`.
    pub fn word_count(&self, class: &str, term: &str) -> usize {
        self.class_index(class)
            .and_then(|index| self.word_counts[index].get(term).copied())
            .unwrap_or(0)
    }

    /// Total word occurrences in training documents of `class`.
    pub fn class_total(&self, class: &str) -> usize {
        self.class_index(class)
            .map(|index| self.class_totals[index])
            .unwrap_or(0)
    }

    /// The `Lc` constant used when scoring the class at `index`.
    fn normalizer_for(&self, index: usize) -> usize {
        match self.normalizer {
            NormalizerMode::PerClass => self.class_totals[index],
            NormalizerMode::LastTrainingClass => self.last_class_total,
        }
    }

    fn class_index(&self, class: &str) -> Option<usize> {
        self.classes.binary_search_by(|c| c.as_str().cmp(class)).ok()
    }

    /// Log10 score of every class for a token sequence, in class order.
    pub fn score<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<ClassScore> {
        // Summed in term order so scores do not depend on hash iteration order.
        let mut counts: Vec<(String, usize)> = count_words(tokens).into_iter().collect();
        counts.sort_unstable();
        let v = self.vocabulary.len() as f64;

        self.classes
            .iter()
            .enumerate()
            .map(|(index, class)| {
                let denominator = v + self.normalizer_for(index) as f64;
                let likelihood: f64 = counts
                    .iter()
                    .map(|(term, count)| {
                        let in_class = self.word_counts[index].get(term).copied().unwrap_or(0) as f64;
                        *count as f64 * ((in_class + 1.0) / denominator).log10()
                    })
                    .sum();
                ClassScore {
                    class: class.clone(),
                    score: self.priors[index].log10() + likelihood,
                }
            })
            .collect()
    }
}

/// The highest scoring class; the earliest class wins a tie.
pub fn best_class(scores: &[ClassScore]) -> Option<&ClassScore> {
    scores.iter().fold(None, |best: Option<&ClassScore>, candidate| match best {
        Some(best) if best.score >= candidate.score => Some(best),
        _ => Some(candidate),
    })
}

/// Multinomial Naive Bayes classifier.
#[derive(Debug, Clone, Default)]
pub struct NaiveBayesClassifier {
    normalizer: NormalizerMode,
}

impl NaiveBayesClassifier {
    pub fn new(normalizer: NormalizerMode) -> Self {
        NaiveBayesClassifier { normalizer }
    }

    /// Score every test document against the training documents.
    ///
    /// Returns one list of class scores per test document, in class order.
    pub fn classify(&self, training: &[Document], test: &[Document]) -> Result<Vec<Vec<ClassScore>>> {
        let model = NaiveBayesModel::fit(training, self.normalizer)?;
        Ok(test.par_iter().map(|doc| model.score(&doc.tokens)).collect())
    }
}

impl Classifier for NaiveBayesClassifier {
    type Model = NaiveBayesModel;
    type Details = Vec<Vec<ClassScore>>;

    fn method(&self) -> Method {
        Method::NaiveBayes
    }

    fn fit(&self, corpus: &Corpus) -> Result<NaiveBayesModel> {
        NaiveBayesModel::fit(corpus.training(), self.normalizer)
    }

    fn predict(&self, model: &NaiveBayesModel, corpus: &Corpus) -> Result<Classified<Self::Details>> {
        let scores: Vec<Vec<ClassScore>> = corpus
            .test()
            .par_iter()
            .map(|doc| model.score(&doc.tokens))
            .collect();

        let predictions = corpus
            .test()
            .iter()
            .zip(scores.iter())
            .map(|(doc, scores)| {
                let best = best_class(scores)
                    .ok_or_else(|| ClassifyError::data("Naive Bayes model has no classes"))?;
                Ok(Prediction::new(doc.name.clone(), best.class.clone(), doc.label.clone()))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Classified {
            predictions,
            details: scores,
        })
    }

    fn artifacts(
        &self,
        model: &NaiveBayesModel,
        _corpus: &Corpus,
        classified: &Classified<Self::Details>,
    ) -> Vec<Artifact> {
        let vocabulary = model
            .vocabulary
            .iter()
            .map(|(term, count)| vec![term.clone(), count.to_string()]);

        let mut class_vocabulary = Vec::new();
        for (class, counts) in model.classes.iter().zip(model.word_counts.iter()) {
            let mut terms: Vec<(&String, &usize)> = counts.iter().collect();
            terms.sort();
            for (term, count) in terms {
                class_vocabulary.push(vec![class.clone(), term.clone(), count.to_string()]);
            }
        }

        let document_scores = classified
            .predictions
            .iter()
            .zip(classified.details.iter())
            .map(|(prediction, scores)| {
                let mut row = vec![prediction.document.clone()];
                for score in scores {
                    row.push(score.class.clone());
                    row.push(round_to(score.score, 3).to_string());
                }
                row
            });

        vec![
            Artifact::table("vocabulary.csv", vocabulary),
            Artifact::table("class_vocabulary.csv", class_vocabulary),
            Artifact::table("document_scores.csv", document_scores),
        ]
    }
}
