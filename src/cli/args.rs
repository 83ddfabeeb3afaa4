//! Command line argument parsing for the textclass CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::{Method, NormalizerMode};

/// textclass - Naive Bayes, Rocchio, KNN and ID3 text classification
#[derive(Parser, Debug, Clone)]
#[command(name = "textclass")]
#[command(about = "Classify a directory of text documents with Naive Bayes, Rocchio, KNN or ID3")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct TextclassArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl TextclassArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run one classifier over a corpus and write its artifacts
    Run(RunArgs),

    /// Show corpus statistics without classifying
    Inspect(InspectArgs),

    /// Print the default configuration as JSON
    Config,
}

/// Arguments for a classification run
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Classification method
    #[arg(value_name = "METHOD")]
    pub method: Method,

    /// Corpus directory containing train/ and test/
    #[arg(short, long, value_name = "DIR")]
    pub input: Option<PathBuf>,

    /// Directory that receives the per-method output directory
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Number of KNN neighbors
    #[arg(short, long)]
    pub k: Option<usize>,

    /// JSON configuration file; flags override its values
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Naive Bayes normalizer
    #[arg(long)]
    pub normalizer: Option<NormalizerMode>,

    /// Show progress messages
    #[arg(long)]
    pub progress: bool,
}

/// Arguments for corpus inspection
#[derive(Parser, Debug, Clone)]
pub struct InspectArgs {
    /// Corpus directory containing train/ and test/
    #[arg(short, long, value_name = "DIR")]
    pub input: PathBuf,

    /// JSON configuration file for the analysis settings
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_run_command() {
        let args = TextclassArgs::try_parse_from([
            "textclass",
            "run",
            "knn",
            "--input",
            "/data/china",
            "--output",
            "/tmp/out",
            "-k",
            "5",
        ])
        .unwrap();

        if let Command::Run(run_args) = args.command {
            assert_eq!(run_args.method, Method::Knn);
            assert_eq!(run_args.input, Some(PathBuf::from("/data/china")));
            assert_eq!(run_args.output, Some(PathBuf::from("/tmp/out")));
            assert_eq!(run_args.k, Some(5));
            assert_eq!(run_args.normalizer, None);
        } else {
            panic!("Expected Run command");
        }
    }

    #[test]
    fn test_run_methods_and_normalizer() {
        let args = TextclassArgs::try_parse_from([
            "textclass",
            "run",
            "naive-bayes",
            "--normalizer",
            "last-training-class",
        ])
        .unwrap();

        if let Command::Run(run_args) = args.command {
            assert_eq!(run_args.method, Method::NaiveBayes);
            assert_eq!(run_args.normalizer, Some(NormalizerMode::LastTrainingClass));
        } else {
            panic!("Expected Run command");
        }

        assert!(TextclassArgs::try_parse_from(["textclass", "run", "svm"]).is_err());
    }

    #[test]
    fn test_inspect_command() {
        let args = TextclassArgs::try_parse_from(["textclass", "inspect", "-i", "corpus"]).unwrap();

        if let Command::Inspect(inspect_args) = args.command {
            assert_eq!(inspect_args.input, PathBuf::from("corpus"));
        } else {
            panic!("Expected Inspect command");
        }
    }

    #[test]
    fn test_verbosity_levels() {
        // Default verbosity
        let args = TextclassArgs::try_parse_from(["textclass", "config"]).unwrap();
        assert_eq!(args.verbosity(), 1);

        // Multiple verbose flags
        let args = TextclassArgs::try_parse_from(["textclass", "-vvv", "config"]).unwrap();
        assert_eq!(args.verbosity(), 3);

        // Quiet flag
        let args = TextclassArgs::try_parse_from(["textclass", "-q", "-vv", "config"]).unwrap();
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_output_format() {
        let args = TextclassArgs::try_parse_from(["textclass", "--format", "json", "config"]).unwrap();
        assert_eq!(args.output_format, OutputFormat::Json);
    }
}
