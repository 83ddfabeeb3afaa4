//! Command implementations for the textclass CLI.

use std::sync::Arc;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::ClassificationConfig;
use crate::engine::ClassificationEngine;
use crate::error::Result;
use crate::progress::LogObserver;

/// Execute a CLI command.
pub fn execute_command(args: TextclassArgs) -> Result<()> {
    match &args.command {
        Command::Run(run_args) => run_classification(run_args.clone(), &args),
        Command::Inspect(inspect_args) => inspect_corpus(inspect_args.clone(), &args),
        Command::Config => show_config(&args),
    }
}

/// Build the run configuration: file (or defaults) first, then flags.
pub fn build_config(args: &RunArgs) -> Result<ClassificationConfig> {
    let mut config = match &args.config {
        Some(path) => ClassificationConfig::from_file(path)?,
        None => ClassificationConfig::default(),
    };

    config.method = args.method;
    if let Some(input) = &args.input {
        config.input_dir = input.clone();
    }
    if let Some(output) = &args.output {
        config.output_dir = output.clone();
    }
    if let Some(k) = args.k {
        config.knn.k = k;
    }
    if let Some(normalizer) = args.normalizer {
        config.naive_bayes.normalizer = normalizer;
    }

    Ok(config)
}

/// Run one classifier.
fn run_classification(args: RunArgs, cli_args: &TextclassArgs) -> Result<()> {
    let config = build_config(&args)?;
    if cli_args.verbosity() > 1 {
        println!(
            "Running {} on {}",
            config.method.display_name(),
            config.input_dir.display()
        );
    }

    let mut engine = ClassificationEngine::new(config);
    if args.progress {
        engine = engine.with_observer(Arc::new(LogObserver));
    }
    let summary = engine.run()?;

    output_result("Classification finished", &OutputValue::Run(&summary), cli_args)
}

/// Show corpus statistics.
fn inspect_corpus(args: InspectArgs, cli_args: &TextclassArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => ClassificationConfig::from_file(path)?,
        None => ClassificationConfig::default(),
    };
    config.input_dir = args.input.clone();

    let stats = ClassificationEngine::new(config).inspect()?;
    output_result("Corpus statistics", &OutputValue::Stats(&stats), cli_args)
}

/// Print the default configuration.
fn show_config(cli_args: &TextclassArgs) -> Result<()> {
    let config = ClassificationConfig::default();
    let json = if cli_args.pretty || cli_args.output_format == OutputFormat::Human {
        serde_json::to_string_pretty(&config)?
    } else {
        serde_json::to_string(&config)?
    };
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Method, NormalizerMode};
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    fn run_args(argv: &[&str]) -> RunArgs {
        let args = TextclassArgs::try_parse_from(argv).unwrap();
        match args.command {
            Command::Run(run_args) => run_args,
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_flags_override_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"input_dir": "from_file", "knn": {"k": 7}, "naive_bayes": {"normalizer": "last-training-class"}}"#,
        )
        .unwrap();

        let args = run_args(&[
            "textclass",
            "run",
            "knn",
            "--config",
            path.to_str().unwrap(),
            "-k",
            "2",
        ]);
        let config = build_config(&args).unwrap();

        assert_eq!(config.method, Method::Knn);
        assert_eq!(config.input_dir, std::path::PathBuf::from("from_file"));
        assert_eq!(config.knn.k, 2);
        assert_eq!(config.naive_bayes.normalizer, NormalizerMode::LastTrainingClass);
    }

    #[test]
    fn test_defaults_without_config_file() {
        let args = run_args(&["textclass", "run", "id3", "-i", "in", "-o", "out"]);
        let config = build_config(&args).unwrap();

        assert_eq!(config.method, Method::Id3);
        assert_eq!(config.method_output_dir(), std::path::PathBuf::from("out").join("id3_out"));
        assert_eq!(config.knn.k, 3);
    }
}
