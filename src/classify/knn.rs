//! K nearest neighbors in TF-IDF space.
//!
//! Every test vector collects its `k` nearest training vectors (equal
//! distances keep training order), each neighbor casts one vote for its
//! label, and the label with the most votes wins. Labels with equal votes are
//! ranked by their nearest neighbor.

use log::debug;
use rayon::prelude::*;

use crate::classify::{Classified, Classifier, Prediction, tfidf_matrix_artifact};
use crate::config::Method;
use crate::corpus::Corpus;
use crate::error::{ClassifyError, Result};
use crate::neighbors::{Neighbor, Vote, nearest_neighbors, vote_label};
use crate::report::Artifact;
use crate::vectorize::{TfIdfMatrix, TfIdfVectorizer};

/// Neighbors and vote tally behind one KNN prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct KnnDecision {
    /// The `k` nearest training documents, nearest first.
    pub neighbors: Vec<Neighbor>,
    /// Votes per label, winner first.
    pub votes: Vec<Vote>,
}

impl KnnDecision {
    /// The winning label.
    pub fn label(&self) -> Option<&str> {
        self.votes.first().map(|vote| vote.label.as_str())
    }
}

/// KNN classifier.
#[derive(Debug, Clone, Copy)]
pub struct KnnClassifier {
    k: usize,
}

impl KnnClassifier {
    pub fn new(k: usize) -> Self {
        KnnClassifier { k }
    }

    /// Number of voting neighbors.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Check `1 <= k <= training_size`.
    pub fn validate(&self, training_size: usize) -> Result<()> {
        if self.k == 0 || self.k > training_size {
            return Err(ClassifyError::configuration(format!(
                "k must be between 1 and the number of training documents ({training_size}), got {}",
                self.k
            )));
        }
        Ok(())
    }

    /// Classify every test vector against the labeled training vectors.
    pub fn classify<L: AsRef<str> + Sync>(
        &self,
        training: &[Vec<f64>],
        labels: &[L],
        test: &[Vec<f64>],
    ) -> Result<Vec<KnnDecision>> {
        self.validate(training.len())?;

        test.par_iter()
            .map(|query| -> Result<KnnDecision> {
                let neighbors = nearest_neighbors(training, labels, query, self.k)?;
                let votes = vote_label(&neighbors);
                Ok(KnnDecision { neighbors, votes })
            })
            .collect()
    }
}

impl Classifier for KnnClassifier {
    type Model = TfIdfMatrix;
    type Details = Vec<KnnDecision>;

    fn method(&self) -> Method {
        Method::Knn
    }

    fn fit(&self, corpus: &Corpus) -> Result<TfIdfMatrix> {
        self.validate(corpus.training().len())?;
        let matrix = TfIdfVectorizer::fit_transform(corpus.training(), corpus.test())?;
        debug!("KNN fitted: k={} over {} terms", self.k, matrix.vocabulary.len());
        Ok(matrix)
    }

    fn predict(&self, matrix: &TfIdfMatrix, corpus: &Corpus) -> Result<Classified<Self::Details>> {
        let (training, test) = matrix.split_at(corpus.split_index());
        let decisions = self.classify(training, &corpus.training_labels(), test)?;

        let predictions = corpus
            .test()
            .iter()
            .zip(decisions.iter())
            .map(|(doc, decision)| {
                let label = decision
                    .label()
                    .ok_or_else(|| ClassifyError::data(format!("no neighbors voted for {}", doc.name)))?;
                Ok(Prediction::new(doc.name.clone(), label, doc.label.clone()))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Classified {
            predictions,
            details: decisions,
        })
    }

    fn artifacts(
        &self,
        matrix: &TfIdfMatrix,
        corpus: &Corpus,
        classified: &Classified<Self::Details>,
    ) -> Vec<Artifact> {
        let training = corpus.training();
        let mut neighbors = Vec::new();
        let mut votes = Vec::new();

        for (prediction, decision) in classified.predictions.iter().zip(classified.details.iter()) {
            let heading = vec![
                prediction.document.clone(),
                prediction.actual.clone().unwrap_or_default(),
            ];

            neighbors.push(heading.clone());
            for neighbor in &decision.neighbors {
                let name = training
                    .get(neighbor.index)
                    .map(|doc| doc.name.clone())
                    .unwrap_or_default();
                neighbors.push(vec![name, neighbor.label.clone(), neighbor.distance.to_string()]);
            }

            votes.push(heading);
            for vote in &decision.votes {
                votes.push(vec![vote.label.clone(), vote.votes.to_string()]);
            }
        }

        vec![
            tfidf_matrix_artifact(matrix, corpus),
            Artifact::table("neighbors.csv", neighbors),
            Artifact::table("votes.csv", votes),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Document;

    #[test]
    fn test_k1_picks_nearest_label() {
        let training = vec![vec![0.0, 0.0], vec![1.0, 1.0], vec![5.0, 5.0]];
        let labels = ["a", "b", "c"];

        let decisions = KnnClassifier::new(1)
            .classify(&training, &labels, &[vec![0.9, 0.8], vec![4.0, 4.5]])
            .unwrap();

        assert_eq!(decisions[0].label(), Some("b"));
        assert_eq!(decisions[1].label(), Some("c"));
    }

    #[test]
    fn test_k1_equal_distance_keeps_training_order() {
        let training = vec![vec![1.0], vec![-1.0]];
        let labels = ["first", "second"];

        let decisions = KnnClassifier::new(1).classify(&training, &labels, &[vec![0.0]]).unwrap();
        assert_eq!(decisions[0].label(), Some("first"));
    }

    #[test]
    fn test_majority_vote() {
        let training = vec![vec![0.0], vec![0.3], vec![0.4], vec![9.0]];
        let labels = ["x", "y", "y", "x"];

        let decisions = KnnClassifier::new(3).classify(&training, &labels, &[vec![0.1]]).unwrap();
        assert_eq!(decisions[0].neighbors.len(), 3);
        assert_eq!(decisions[0].label(), Some("y"));
        assert_eq!(decisions[0].votes[0].votes, 2);
    }

    #[test]
    fn test_vote_tie_goes_to_nearest_label() {
        let training = vec![vec![0.5], vec![0.1], vec![0.2], vec![0.6]];
        let labels = ["x", "y", "x", "y"];

        let decisions = KnnClassifier::new(4).classify(&training, &labels, &[vec![0.0]]).unwrap();
        assert_eq!(decisions[0].label(), Some("y"));
    }

    #[test]
    fn test_k_out_of_range_is_configuration_error() {
        let training = vec![vec![0.0]];
        let labels = ["x"];

        for k in [0, 2] {
            let result = KnnClassifier::new(k).classify(&training, &labels, &[vec![0.0]]);
            assert!(matches!(result, Err(ClassifyError::Configuration(_))));
        }
    }

    #[test]
    fn test_run_phases_and_artifacts() {
        let corpus = Corpus::new(
            vec![
                Document::from_text("train/sport/1", "ball goal match", Some("sport")),
                Document::from_text("train/sport/2", "goal team ball", Some("sport")),
                Document::from_text("train/tech/3", "code rust compiler", Some("tech")),
            ],
            vec![Document::from_text("test/sport/4", "ball goal", Some("sport"))],
        )
        .unwrap();
        let classifier = KnnClassifier::new(1);

        let matrix = classifier.fit(&corpus).unwrap();
        let classified = classifier.predict(&matrix, &corpus).unwrap();
        assert_eq!(classified.predictions[0].predicted, "sport");
        assert_eq!(classified.predictions[0].is_correct(), Some(true));

        let artifacts = classifier.artifacts(&matrix, &corpus, &classified);
        let names: Vec<&str> = artifacts.iter().map(|a| a.file_name.as_str()).collect();
        assert_eq!(names, vec!["tfidf_matrix.csv", "neighbors.csv", "votes.csv"]);
        assert!(artifacts[1].content.starts_with("test/sport/4;sport\ntrain/sport/1;sport;"));
        assert_eq!(artifacts[2].content, "test/sport/4;sport\nsport;1\n");
    }
}
