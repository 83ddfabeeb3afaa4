//! Run configuration.
//!
//! A [`ClassificationConfig`] fully describes one run: where the corpus lives,
//! where artifacts go, which classifier to execute and how documents are
//! analyzed. It can be built in code, loaded from a JSON file, or assembled by
//! the CLI from flags.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::{Analyzer, PipelineAnalyzer};
use crate::analysis::token_filter::{LowercaseFilter, StopFilter};
use crate::analysis::tokenizer::{RegexTokenizer, Tokenizer, UnicodeWordTokenizer, WhitespaceTokenizer};
use crate::error::{ClassifyError, Result};

/// Classification algorithm selected for a run.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Method {
    /// Multinomial Naive Bayes over word counts
    NaiveBayes,
    /// Nearest class centroid in TF-IDF space
    Rocchio,
    /// K nearest neighbors in TF-IDF space
    Knn,
    /// ID3 decision tree over word presence (two classes)
    Id3,
}

impl Method {
    /// Subdirectory of the output directory that receives this method's artifacts.
    pub fn output_subdir(&self) -> &'static str {
        match self {
            Method::NaiveBayes => "nb_out",
            Method::Rocchio => "roc_out",
            Method::Knn => "knn_out",
            Method::Id3 => "id3_out",
        }
    }

    /// Human readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Method::NaiveBayes => "Naive Bayes",
            Method::Rocchio => "Rocchio",
            Method::Knn => "KNN",
            Method::Id3 => "ID3",
        }
    }
}

/// How the Naive Bayes denominator constant `Lc` is chosen.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NormalizerMode {
    /// `Lc` is the total word count of the class being scored.
    #[default]
    PerClass,
    /// `Lc` is fixed once per run to the total word count of the class of the
    /// last training document, for output compatibility with the legacy tool.
    LastTrainingClass,
}

/// Tokenizer used by the analysis pipeline.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenizerKind {
    /// Regex matches (`\w+` unless a pattern is configured)
    #[default]
    Regex,
    /// Unicode word boundaries
    UnicodeWord,
    /// Whitespace separated words
    Whitespace,
}

/// Document analysis settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Tokenizer to split documents with.
    pub tokenizer: TokenizerKind,
    /// Custom pattern for the regex tokenizer.
    pub pattern: Option<String>,
    /// Lowercase tokens.
    pub lowercase: bool,
    /// Remove stop words.
    pub remove_stop_words: bool,
    /// Replace the built-in stop word lists.
    pub stop_words: Option<Vec<String>>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            tokenizer: TokenizerKind::Regex,
            pattern: None,
            lowercase: true,
            remove_stop_words: true,
            stop_words: None,
        }
    }
}

impl AnalysisConfig {
    /// Build the analyzer described by this configuration.
    pub fn build_analyzer(&self) -> Result<Arc<dyn Analyzer>> {
        let tokenizer: Arc<dyn Tokenizer> = match self.tokenizer {
            TokenizerKind::Regex => match &self.pattern {
                Some(pattern) => Arc::new(RegexTokenizer::with_pattern(pattern)?),
                None => Arc::new(RegexTokenizer::new()?),
            },
            TokenizerKind::UnicodeWord => Arc::new(UnicodeWordTokenizer::new()),
            TokenizerKind::Whitespace => Arc::new(WhitespaceTokenizer::new()),
        };

        let mut analyzer = PipelineAnalyzer::new(tokenizer);
        if self.lowercase {
            analyzer = analyzer.add_filter(Arc::new(LowercaseFilter::new()));
        }
        if self.remove_stop_words {
            let filter = match &self.stop_words {
                Some(words) => StopFilter::from_words(words.iter().cloned()),
                None => StopFilter::new(),
            };
            analyzer = analyzer.add_filter(Arc::new(filter));
        }

        Ok(Arc::new(analyzer))
    }
}

/// Naive Bayes settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NaiveBayesConfig {
    /// Selection of the `Lc` denominator constant.
    pub normalizer: NormalizerMode,
}

/// KNN settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnnConfig {
    /// Number of neighbors that vote.
    pub k: usize,
}

impl Default for KnnConfig {
    fn default() -> Self {
        Self { k: 3 }
    }
}

/// Configuration for a single classification run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationConfig {
    /// Corpus root containing `train/` and `test/`.
    pub input_dir: PathBuf,
    /// Root directory for artifacts; each method writes into its own subdirectory.
    pub output_dir: PathBuf,
    /// Classifier to run.
    pub method: Method,
    /// Document analysis.
    pub analysis: AnalysisConfig,
    /// Naive Bayes options.
    pub naive_bayes: NaiveBayesConfig,
    /// KNN options.
    pub knn: KnnConfig,
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("input_files/classification"),
            output_dir: PathBuf::from("output_files/classification"),
            method: Method::NaiveBayes,
            analysis: AnalysisConfig::default(),
            naive_bayes: NaiveBayesConfig::default(),
            knn: KnnConfig::default(),
        }
    }
}

impl ClassificationConfig {
    /// Create a configuration for the given directories and method.
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(input_dir: P, output_dir: Q, method: Method) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            method,
            ..Self::default()
        }
    }

    /// Load a configuration from a JSON file. Missing keys take their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ClassifyError::configuration(format!("cannot read config file {}: {e}", path.display()))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            ClassifyError::configuration(format!("malformed config file {}: {e}", path.display()))
        })
    }

    /// Set the number of KNN neighbors.
    pub fn with_k(mut self, k: usize) -> Self {
        self.knn.k = k;
        self
    }

    /// Set the Naive Bayes normalizer mode.
    pub fn with_normalizer(mut self, normalizer: NormalizerMode) -> Self {
        self.naive_bayes.normalizer = normalizer;
        self
    }

    /// Directory that receives the artifacts of the configured method.
    pub fn method_output_dir(&self) -> PathBuf {
        self.output_dir.join(self.method.output_subdir())
    }

    /// Check the parts of the configuration that do not need the corpus.
    pub fn validate(&self) -> Result<()> {
        if !self.input_dir.is_dir() {
            return Err(ClassifyError::configuration(format!(
                "input directory {} does not exist",
                self.input_dir.display()
            )));
        }
        if fs::read_dir(&self.input_dir)?.next().is_none() {
            return Err(ClassifyError::configuration(format!(
                "input directory {} is empty",
                self.input_dir.display()
            )));
        }
        if self.method == Method::Knn && self.knn.k == 0 {
            return Err(ClassifyError::configuration("k must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ClassificationConfig =
            serde_json::from_str(r#"{"method": "knn", "knn": {"k": 5}}"#).unwrap();

        assert_eq!(config.method, Method::Knn);
        assert_eq!(config.knn.k, 5);
        assert_eq!(config.naive_bayes.normalizer, NormalizerMode::PerClass);
        assert!(config.analysis.lowercase);
    }

    #[test]
    fn test_validate_rejects_missing_and_empty_input() {
        let temp_dir = TempDir::new().unwrap();
        let missing = ClassificationConfig::new(temp_dir.path().join("nope"), "out", Method::Rocchio);
        assert!(matches!(missing.validate(), Err(ClassifyError::Configuration(_))));

        let empty = ClassificationConfig::new(temp_dir.path(), "out", Method::Rocchio);
        assert!(matches!(empty.validate(), Err(ClassifyError::Configuration(_))));
    }

    #[test]
    fn test_validate_rejects_zero_k() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("train")).unwrap();

        let config = ClassificationConfig::new(temp_dir.path(), "out", Method::Knn).with_k(0);
        assert!(matches!(config.validate(), Err(ClassifyError::Configuration(_))));
        assert!(config.with_k(1).validate().is_ok());
    }

    #[test]
    fn test_from_file_reports_configuration_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            ClassificationConfig::from_file(&path),
            Err(ClassifyError::Configuration(_))
        ));
    }

    #[test]
    fn test_build_analyzer_from_config() {
        let config = AnalysisConfig {
            tokenizer: TokenizerKind::Whitespace,
            stop_words: Some(vec!["x".to_string()]),
            ..AnalysisConfig::default()
        };
        let analyzer = config.build_analyzer().unwrap();
        assert_eq!(analyzer.terms("A x B").unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_method_output_dir() {
        let config = ClassificationConfig::new("in", "out", Method::Id3);
        assert_eq!(config.method_output_dir(), PathBuf::from("out").join("id3_out"));
    }
}
