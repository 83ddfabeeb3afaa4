//! Reads a corpus from the `train/` + `test/` directory convention.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, info};
use rayon::prelude::*;

use crate::analysis::analyzer::Analyzer;
use crate::corpus::{Corpus, Document};
use crate::error::{ClassifyError, Result};

const TRAIN_DIR: &str = "train";
const TEST_DIR: &str = "test";

/// A file discovered on disk, before it is read and analyzed.
#[derive(Debug, Clone)]
struct PendingDocument {
    path: PathBuf,
    name: String,
    label: Option<String>,
}

/// Discovers corpus files and turns them into analyzed [`Document`]s.
pub struct CorpusLoader {
    analyzer: Arc<dyn Analyzer>,
}

impl CorpusLoader {
    /// Create a loader that analyzes every file with `analyzer`.
    pub fn new(analyzer: Arc<dyn Analyzer>) -> Self {
        CorpusLoader { analyzer }
    }

    /// Load the corpus rooted at `input_dir`.
    pub fn load<P: AsRef<Path>>(&self, input_dir: P) -> Result<Corpus> {
        let input_dir = input_dir.as_ref();
        let train_dir = input_dir.join(TRAIN_DIR);
        let test_dir = input_dir.join(TEST_DIR);

        for dir in [&train_dir, &test_dir] {
            if !dir.is_dir() {
                return Err(ClassifyError::data(format!(
                    "malformed corpus layout: {} is missing",
                    dir.display()
                )));
            }
        }

        let training = self.discover(&train_dir, TRAIN_DIR, false)?;
        let test = self.discover(&test_dir, TEST_DIR, true)?;
        info!(
            "Discovered {} training and {} test files under {}",
            training.len(),
            test.len(),
            input_dir.display()
        );

        let training = self.analyze_all(training)?;
        let test = self.analyze_all(test)?;

        Corpus::new(training, test)
    }

    /// List the documents below `dir`: class subdirectories first (sorted),
    /// then, when `allow_unlabeled` is set, loose files (sorted).
    fn discover(&self, dir: &Path, prefix: &str, allow_unlabeled: bool) -> Result<Vec<PendingDocument>> {
        let (class_dirs, loose_files) = sorted_entries(dir)?;
        let mut pending = Vec::new();

        for class_dir in class_dirs {
            let class = file_name(&class_dir);
            let (_, files) = sorted_entries(&class_dir)?;
            debug!("Class {class}: {} files", files.len());
            for path in files {
                pending.push(PendingDocument {
                    name: format!("{prefix}/{class}/{}", file_name(&path)),
                    label: Some(class.clone()),
                    path,
                });
            }
        }

        if allow_unlabeled {
            for path in loose_files {
                pending.push(PendingDocument {
                    name: format!("{prefix}/{}", file_name(&path)),
                    label: None,
                    path,
                });
            }
        }

        Ok(pending)
    }

    fn analyze_all(&self, pending: Vec<PendingDocument>) -> Result<Vec<Document>> {
        pending
            .into_par_iter()
            .map(|doc| -> Result<Document> {
                let bytes = fs::read(&doc.path)?;
                let text = String::from_utf8_lossy(&bytes);
                let tokens = self.analyzer.terms(&text)?;
                Ok(Document::new(doc.name, tokens, doc.label))
            })
            .collect()
    }
}

/// Directory entries split into (subdirectories, files), each sorted by path.
fn sorted_entries(dir: &Path) -> Result<(Vec<PathBuf>, Vec<PathBuf>)> {
    let mut dirs = Vec::new();
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            dirs.push(path);
        } else if path.is_file() {
            files.push(path);
        }
    }
    dirs.sort();
    files.sort();

    Ok((dirs, files))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyzer::StandardAnalyzer;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_load_orders_training_then_test() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(root, "train/other/d4.txt", "Tokyo Japan Chinese");
        write(root, "train/china/d2.txt", "Chinese Chinese Shanghai");
        write(root, "train/china/d1.txt", "Chinese Beijing Chinese");
        write(root, "test/china/d5.txt", "Chinese Chinese Tokyo");
        write(root, "test/d6.txt", "Macao");

        let loader = CorpusLoader::new(Arc::new(StandardAnalyzer::new().unwrap()));
        let corpus = loader.load(root).unwrap();

        assert_eq!(
            corpus.file_names(),
            vec![
                "train/china/d1.txt",
                "train/china/d2.txt",
                "train/other/d4.txt",
                "test/china/d5.txt",
                "test/d6.txt",
            ]
        );
        assert_eq!(corpus.split_index(), 3);
        assert_eq!(corpus.documents()[0].tokens, vec!["chinese", "beijing", "chinese"]);
        assert_eq!(corpus.labels()[3], Some("china"));
        assert_eq!(corpus.labels()[4], None);
    }

    #[test]
    fn test_missing_test_dir_is_data_error() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "train/a/1.txt", "x");

        let loader = CorpusLoader::new(Arc::new(StandardAnalyzer::new().unwrap()));
        assert!(matches!(loader.load(temp_dir.path()), Err(ClassifyError::Data(_))));
    }

    #[test]
    fn test_loose_training_files_are_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(root, "train/readme.txt", "not a document");
        write(root, "train/a/1.txt", "x");
        write(root, "test/2.txt", "x");

        let loader = CorpusLoader::new(Arc::new(StandardAnalyzer::new().unwrap()));
        let corpus = loader.load(root).unwrap();
        assert_eq!(corpus.training().len(), 1);
    }
}
