//! Output formatting for CLI commands.

use serde::Serialize;

use crate::cli::args::{OutputFormat, TextclassArgs};
use crate::corpus::CorpusStats;
use crate::engine::RunSummary;
use crate::error::Result;

/// A command result that can be printed in any output format.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum OutputValue<'a> {
    Run(&'a RunSummary),
    Stats(&'a CorpusStats),
}

/// Output a result in the specified format.
pub fn output_result(message: &str, result: &OutputValue<'_>, args: &TextclassArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 0 {
                println!("{message}");
                println!();
            }
            println!("{}", render_human(result));
            Ok(())
        }
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &TextclassArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    println!("{json}");
    Ok(())
}

/// Render a result for people.
pub fn render_human(result: &OutputValue<'_>) -> String {
    match result {
        OutputValue::Run(summary) => render_run_summary(summary),
        OutputValue::Stats(stats) => render_corpus_stats(stats),
    }
}

fn render_run_summary(summary: &RunSummary) -> String {
    let mut lines = vec![
        format!("{} Results:", summary.method.display_name()),
        "════════════════".to_string(),
        format!("Input: {}", summary.input_dir),
        format!("Output: {}", summary.output_dir),
        format!(
            "Documents: {} training, {} test",
            summary.training_documents, summary.test_documents
        ),
        format!("Classes: {}", summary.classes.join(", ")),
        String::new(),
        "Predictions:".to_string(),
        "────────────".to_string(),
    ];

    for prediction in &summary.predictions {
        let verdict = match prediction.is_correct() {
            Some(true) => "ok",
            Some(false) => "wrong",
            None => "unknown",
        };
        lines.push(format!(
            "> {} = {} (actual: {}, {verdict})",
            prediction.document,
            prediction.predicted,
            prediction.actual.as_deref().unwrap_or("?")
        ));
    }

    lines.push(String::new());
    lines.push(match summary.accuracy {
        Some(accuracy) => format!("Accuracy: {accuracy}%"),
        None => "Accuracy: n/a".to_string(),
    });

    lines.push(String::new());
    lines.push("Output files:".to_string());
    for artifact in &summary.artifacts {
        match &artifact.error {
            None => lines.push(format!("  {}", artifact.path)),
            Some(error) => lines.push(format!("  {} (failed: {error})", artifact.path)),
        }
    }
    lines.push(format!("Finished in {}ms", summary.duration_ms));

    lines.join("\n")
}

fn render_corpus_stats(stats: &CorpusStats) -> String {
    let mut lines = vec![
        "Corpus Statistics:".to_string(),
        "══════════════════".to_string(),
        format!("Training documents: {}", stats.training_documents),
        format!(
            "Test documents: {} ({} with known class)",
            stats.test_documents, stats.labeled_test_documents
        ),
        format!("Vocabulary size: {}", stats.vocabulary_size),
        String::new(),
        "Training documents per class:".to_string(),
    ];
    for (class, count) in &stats.training_per_class {
        lines.push(format!("  {class}: {count}"));
    }
    lines.join("\n")
}
