//! Classification engine.
//!
//! The engine owns one [`ClassificationConfig`] and executes exactly one
//! classifier per run through the phases load → fit → predict → report.
//! Progress goes to an injected [`ProgressObserver`]; cancellation is checked
//! between phases only, so a cancelled run never leaves partial artifacts.

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::classify::{
    Classifier, Id3Classifier, KnnClassifier, NaiveBayesClassifier, Prediction, RocchioClassifier,
};
use crate::config::{ClassificationConfig, Method};
use crate::corpus::{Corpus, CorpusStats};
use crate::error::Result;
use crate::metrics::accuracy;
use crate::progress::{CancellationToken, NoopObserver, ProgressObserver, ProgressReporter};
use crate::report::{Artifact, ArtifactStatus, ReportWriter};

/// Outcome of one classification run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub method: Method,
    pub input_dir: String,
    pub output_dir: String,
    pub training_documents: usize,
    pub test_documents: usize,
    /// Class set in sorted order.
    pub classes: Vec<String>,
    /// One prediction per test document, in corpus order.
    pub predictions: Vec<Prediction>,
    /// Percentage of correct predictions among test documents with a known
    /// class, rounded to two decimals.
    pub accuracy: Option<f64>,
    pub artifacts: Vec<ArtifactStatus>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub duration_ms: u64,
}

impl RunSummary {
    /// Whether every artifact was written.
    pub fn all_artifacts_written(&self) -> bool {
        self.artifacts.iter().all(|status| status.written)
    }
}

/// Runs classifiers according to a configuration.
pub struct ClassificationEngine {
    config: ClassificationConfig,
    observer: Arc<dyn ProgressObserver>,
    cancellation: CancellationToken,
}

impl ClassificationEngine {
    /// Create an engine that reports progress nowhere.
    pub fn new(config: ClassificationConfig) -> Self {
        ClassificationEngine {
            config,
            observer: Arc::new(NoopObserver),
            cancellation: CancellationToken::new(),
        }
    }

    /// Send progress to `observer`.
    pub fn with_observer(mut self, observer: Arc<dyn ProgressObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Check `token` between phases.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    pub fn config(&self) -> &ClassificationConfig {
        &self.config
    }

    /// Load the configured corpus without classifying it.
    pub fn load_corpus(&self) -> Result<Corpus> {
        let analyzer = self.config.analysis.build_analyzer()?;
        Corpus::load(&self.config.input_dir, analyzer)
    }

    /// Statistics of the configured corpus.
    pub fn inspect(&self) -> Result<CorpusStats> {
        self.config.validate()?;
        Ok(self.load_corpus()?.stats())
    }

    /// Execute the configured classifier and write its artifacts.
    pub fn run(&self) -> Result<RunSummary> {
        let started_at = Utc::now();
        let timer = Instant::now();
        let method = self.config.method;
        let reporter = ProgressReporter::new(self.observer.clone());

        reporter.checkpoint(0);
        reporter.message(format!("{} classification", method.display_name()));
        self.config.validate()?;

        self.cancellation.check("loading the corpus")?;
        let corpus = self.load_corpus()?;
        reporter.checkpoint(10);
        info!(
            "Loaded {} training and {} test documents",
            corpus.training().len(),
            corpus.test().len()
        );

        let (predictions, artifacts) = match method {
            Method::NaiveBayes => self.execute(
                &NaiveBayesClassifier::new(self.config.naive_bayes.normalizer),
                &corpus,
                &reporter,
            )?,
            Method::Rocchio => self.execute(&RocchioClassifier::new(), &corpus, &reporter)?,
            Method::Knn => self.execute(&KnnClassifier::new(self.config.knn.k), &corpus, &reporter)?,
            Method::Id3 => self.execute(&Id3Classifier::new(), &corpus, &reporter)?,
        };

        for prediction in &predictions {
            debug!(
                "{}: predicted {}, actual {}",
                prediction.document,
                prediction.predicted,
                prediction.actual.as_deref().unwrap_or("unknown")
            );
        }

        let truth: Vec<Option<&str>> = predictions.iter().map(|p| p.actual.as_deref()).collect();
        let predicted: Vec<&str> = predictions.iter().map(|p| p.predicted.as_str()).collect();
        let accuracy = accuracy(&truth, &predicted);
        match accuracy {
            Some(value) => reporter.message(format!("Accuracy: {value}%")),
            None => reporter.message("Accuracy: no test document has a known class"),
        }
        reporter.checkpoint(80);

        let output_dir = self.config.method_output_dir();
        let statuses = ReportWriter::new(&output_dir).write_all(&artifacts);
        reporter.message("Output files:");
        for status in &statuses {
            if status.written {
                reporter.message(&status.path);
            } else {
                warn!("Artifact {} was not written", status.path);
            }
        }
        reporter.checkpoint(100);
        reporter.message("finished");

        Ok(RunSummary {
            method,
            input_dir: self.config.input_dir.display().to_string(),
            output_dir: output_dir.display().to_string(),
            training_documents: corpus.training().len(),
            test_documents: corpus.test().len(),
            classes: corpus.class_set(),
            predictions,
            accuracy,
            artifacts: statuses,
            started_at,
            finished_at: Utc::now(),
            duration_ms: timer.elapsed().as_millis() as u64,
        })
    }

    /// Drive one classifier through fit, predict and render.
    fn execute<C: Classifier>(
        &self,
        classifier: &C,
        corpus: &Corpus,
        reporter: &ProgressReporter,
    ) -> Result<(Vec<Prediction>, Vec<Artifact>)> {
        debug!("Running {}", classifier.method().display_name());

        self.cancellation.check("fitting")?;
        let model = classifier.fit(corpus)?;
        reporter.checkpoint(30);

        self.cancellation.check("predicting")?;
        let classified = classifier.predict(&model, corpus)?;
        reporter.checkpoint(50);

        self.cancellation.check("writing artifacts")?;
        let artifacts = classifier.artifacts(&model, corpus, &classified);
        reporter.checkpoint(60);

        Ok((classified.predictions, artifacts))
    }
}
