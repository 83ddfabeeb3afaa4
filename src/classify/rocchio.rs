//! Rocchio classification: nearest class centroid in TF-IDF space.

use log::debug;
use rayon::prelude::*;

use crate::classify::{Classified, Classifier, Prediction, tfidf_matrix_artifact};
use crate::config::Method;
use crate::corpus::Corpus;
use crate::error::{ClassifyError, Result};
use crate::metrics::round_to;
use crate::neighbors::{Neighbor, rank_by_distance};
use crate::report::Artifact;
use crate::vectorize::{TfIdfMatrix, TfIdfVectorizer};

/// Mean vector of one class, rounded to 3 decimals.
#[derive(Debug, Clone, PartialEq)]
pub struct Centroid {
    pub class: String,
    pub vector: Vec<f64>,
}

/// Per-dimension mean of `vectors`, rounded to 3 decimals.
pub fn centroid(vectors: &[&[f64]]) -> Result<Vec<f64>> {
    let first = vectors
        .first()
        .ok_or_else(|| ClassifyError::data("cannot compute the centroid of an empty class"))?;
    let dimension = first.len();
    let mut sum = vec![0.0; dimension];

    for vector in vectors {
        if vector.len() != dimension {
            return Err(ClassifyError::data(format!(
                "vector dimensions differ: {} vs {}",
                vector.len(),
                dimension
            )));
        }
        for (total, value) in sum.iter_mut().zip(vector.iter()) {
            *total += value;
        }
    }

    let n = vectors.len() as f64;
    Ok(sum.into_iter().map(|total| round_to(total / n, 3)).collect())
}

/// Centroid of every class in `classes`, in that order.
pub fn centroids<L: AsRef<str>>(training: &[Vec<f64>], labels: &[L], classes: &[String]) -> Result<Vec<Centroid>> {
    classes
        .iter()
        .map(|class| {
            let members: Vec<&[f64]> = training
                .iter()
                .zip(labels.iter())
                .filter(|&(_, label)| label.as_ref() == class.as_str())
                .map(|(vector, _)| vector.as_slice())
                .collect();
            Ok(Centroid {
                class: class.clone(),
                vector: centroid(&members)?,
            })
        })
        .collect()
}

/// TF-IDF matrix of the whole corpus with the training centroids.
#[derive(Debug, Clone)]
pub struct RocchioModel {
    pub matrix: TfIdfMatrix,
    pub centroids: Vec<Centroid>,
}

/// Nearest-centroid classifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct RocchioClassifier;

impl RocchioClassifier {
    pub fn new() -> Self {
        RocchioClassifier
    }

    /// Rank the centroids by distance to every test vector.
    ///
    /// Each ranking is nearest first; centroids at equal distance keep their
    /// class order, so the first entry is the prediction.
    pub fn rank(&self, centroids: &[Centroid], test: &[Vec<f64>]) -> Result<Vec<Vec<Neighbor>>> {
        let vectors: Vec<Vec<f64>> = centroids.iter().map(|c| c.vector.clone()).collect();
        let classes: Vec<&str> = centroids.iter().map(|c| c.class.as_str()).collect();

        test.par_iter()
            .map(|query| rank_by_distance(&vectors, &classes, query))
            .collect()
    }
}

impl Classifier for RocchioClassifier {
    type Model = RocchioModel;
    type Details = Vec<Vec<Neighbor>>;

    fn method(&self) -> Method {
        Method::Rocchio
    }

    fn fit(&self, corpus: &Corpus) -> Result<RocchioModel> {
        let matrix = TfIdfVectorizer::fit_transform(corpus.training(), corpus.test())?;
        let (training, _) = matrix.split_at(corpus.split_index());
        let centroids = centroids(training, &corpus.training_labels(), &corpus.class_set())?;
        debug!(
            "Rocchio fitted: {} centroids over {} terms",
            centroids.len(),
            matrix.vocabulary.len()
        );
        Ok(RocchioModel { matrix, centroids })
    }

    fn predict(&self, model: &RocchioModel, corpus: &Corpus) -> Result<Classified<Self::Details>> {
        let (_, test) = model.matrix.split_at(corpus.split_index());
        let rankings = self.rank(&model.centroids, test)?;

        let predictions = corpus
            .test()
            .iter()
            .zip(rankings.iter())
            .map(|(doc, ranking)| {
                let nearest = ranking
                    .first()
                    .ok_or_else(|| ClassifyError::data("Rocchio model has no centroids"))?;
                Ok(Prediction::new(doc.name.clone(), nearest.label.clone(), doc.label.clone()))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Classified {
            predictions,
            details: rankings,
        })
    }

    fn artifacts(
        &self,
        model: &RocchioModel,
        corpus: &Corpus,
        classified: &Classified<Self::Details>,
    ) -> Vec<Artifact> {
        let mut header = model.matrix.vocabulary.clone();
        header.push("class".to_string());
        let centroid_rows = model.centroids.iter().map(|centroid| {
            let mut fields: Vec<String> = centroid.vector.iter().map(f64::to_string).collect();
            fields.push(centroid.class.clone());
            fields
        });

        let mut distances = Vec::new();
        for (prediction, ranking) in classified.predictions.iter().zip(classified.details.iter()) {
            distances.push(vec![
                prediction.document.clone(),
                prediction.actual.clone().unwrap_or_default(),
            ]);
            distances.push(ranking.iter().map(|n| n.label.clone()).collect());
            distances.push(ranking.iter().map(|n| n.distance.to_string()).collect());
        }

        vec![
            Artifact::table("centroids.csv", std::iter::once(header).chain(centroid_rows)),
            Artifact::table("distances.csv", distances),
            tfidf_matrix_artifact(&model.matrix, corpus),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Document;

    fn corpus() -> Corpus {
        Corpus::new(
            vec![
                Document::from_text("train/china/1", "chinese beijing chinese", Some("china")),
                Document::from_text("train/china/2", "chinese shanghai", Some("china")),
                Document::from_text("train/japan/3", "tokyo japan", Some("japan")),
                Document::from_text("train/japan/4", "japan osaka tokyo", Some("japan")),
            ],
            vec![
                Document::from_text("test/china/5", "chinese chinese shanghai", Some("china")),
                Document::from_text("test/japan/6", "tokyo osaka", Some("japan")),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_centroid_is_rounded_mean() {
        let a = [1.0, 0.0, 0.5];
        let b = [0.0, 0.0, 0.25];
        assert_eq!(centroid(&[&a, &b]).unwrap(), vec![0.5, 0.0, 0.375]);

        let c = [1.0 / 3.0];
        assert_eq!(centroid(&[&c]).unwrap(), vec![0.333]);
        assert!(centroid(&[]).is_err());
    }

    #[test]
    fn test_centroids_use_only_class_members() {
        let training = vec![vec![1.0, 0.0], vec![3.0, 0.0], vec![0.0, 2.0]];
        let labels = ["x", "x", "y"];
        let classes = vec!["x".to_string(), "y".to_string()];

        let result = centroids(&training, &labels, &classes).unwrap();
        assert_eq!(result[0].vector, vec![2.0, 0.0]);
        assert_eq!(result[1].vector, vec![0.0, 2.0]);
    }

    #[test]
    fn test_recomputation_is_identical() {
        let corpus = corpus();
        let classifier = RocchioClassifier::new();

        let first = classifier.fit(&corpus).unwrap();
        let second = classifier.fit(&corpus).unwrap();
        assert_eq!(first.centroids, second.centroids);
    }

    #[test]
    fn test_predicts_nearest_centroid_per_document() {
        let corpus = corpus();
        let classifier = RocchioClassifier::new();
        let model = classifier.fit(&corpus).unwrap();
        let classified = classifier.predict(&model, &corpus).unwrap();

        let predicted: Vec<&str> = classified
            .predictions
            .iter()
            .map(|p| p.predicted.as_str())
            .collect();
        assert_eq!(predicted, vec!["china", "japan"]);
        for ranking in &classified.details {
            assert!(ranking[0].distance <= ranking[1].distance);
        }
    }

    #[test]
    fn test_equal_distance_keeps_class_order() {
        let centroids = vec![
            Centroid { class: "a".to_string(), vector: vec![1.0] },
            Centroid { class: "b".to_string(), vector: vec![-1.0] },
        ];
        let ranking = RocchioClassifier::new().rank(&centroids, &[vec![0.0]]).unwrap();
        assert_eq!(ranking[0][0].label, "a");
    }

    #[test]
    fn test_artifacts() {
        let corpus = corpus();
        let classifier = RocchioClassifier::new();
        let model = classifier.fit(&corpus).unwrap();
        let classified = classifier.predict(&model, &corpus).unwrap();
        let artifacts = classifier.artifacts(&model, &corpus, &classified);

        let names: Vec<&str> = artifacts.iter().map(|a| a.file_name.as_str()).collect();
        assert_eq!(names, vec!["centroids.csv", "distances.csv", "tfidf_matrix.csv"]);
        assert!(artifacts[0].content.starts_with("beijing;chinese;japan;osaka;shanghai;tokyo;class\n"));
        assert!(artifacts[1].content.starts_with("test/china/5;china\nchina;japan\n"));
        assert_eq!(artifacts[2].content.lines().count(), 1 + corpus.len());
        assert!(artifacts[2].content.lines().last().unwrap().ends_with(";japan;test/japan/6"));
    }
}
