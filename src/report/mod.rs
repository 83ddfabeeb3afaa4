//! Artifact rendering and writing.
//!
//! Classifiers render their diagnostics into [`Artifact`]s (a file name plus
//! `;`-delimited text); a [`ReportWriter`] then persists them into the
//! method's output directory. Each artifact is written independently: a
//! failure is logged and recorded in its [`ArtifactStatus`] while the
//! remaining artifacts are still attempted.

use std::fs;
use std::path::{Path, PathBuf};

use log::{error, info};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Field delimiter of every table artifact.
pub const DELIMITER: &str = ";";

/// Line terminator of every artifact.
pub const EOL: &str = "\n";

/// Join the fields of one row with [`DELIMITER`].
pub fn join_row<I, S>(fields: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    fields
        .into_iter()
        .map(|field| field.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(DELIMITER)
}

/// Render rows as delimited text, one line per row.
pub fn render_table<R, I, S>(rows: R) -> String
where
    R: IntoIterator<Item = I>,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut content = String::new();
    for row in rows {
        content.push_str(&join_row(row));
        content.push_str(EOL);
    }
    content
}

/// A rendered artifact waiting to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// File name inside the method's output directory.
    pub file_name: String,
    /// Full file content.
    pub content: String,
}

impl Artifact {
    /// An artifact with free-form text content.
    pub fn text<N: Into<String>, C: Into<String>>(file_name: N, content: C) -> Self {
        Artifact {
            file_name: file_name.into(),
            content: content.into(),
        }
    }

    /// An artifact rendered from delimited rows.
    pub fn table<N, R, I, S>(file_name: N, rows: R) -> Self
    where
        N: Into<String>,
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Artifact::text(file_name, render_table(rows))
    }
}

/// Outcome of writing one artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactStatus {
    pub path: String,
    pub written: bool,
    pub error: Option<String>,
}

/// Writes artifacts below one output directory, creating it when absent.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    dir: PathBuf,
}

impl ReportWriter {
    /// Create a writer for `dir`. Nothing touches the disk until a write.
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        ReportWriter { dir: dir.into() }
    }

    /// The output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write free-form text to `file_name`.
    pub fn write_text(&self, content: &str, file_name: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(file_name);
        fs::write(&path, content)?;
        Ok(path)
    }

    /// Write delimited rows to `file_name`.
    pub fn write_table<R, I, S>(&self, rows: R, file_name: &str) -> Result<PathBuf>
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.write_text(&render_table(rows), file_name)
    }

    /// Write every artifact, continuing past failures.
    pub fn write_all(&self, artifacts: &[Artifact]) -> Vec<ArtifactStatus> {
        artifacts
            .iter()
            .map(|artifact| {
                let path = self.dir.join(&artifact.file_name);
                match self.write_text(&artifact.content, &artifact.file_name) {
                    Ok(path) => {
                        info!("Wrote {}", path.display());
                        ArtifactStatus {
                            path: path.display().to_string(),
                            written: true,
                            error: None,
                        }
                    }
                    Err(e) => {
                        error!("Failed to write {}: {e}", path.display());
                        ArtifactStatus {
                            path: path.display().to_string(),
                            written: false,
                            error: Some(e.to_string()),
                        }
                    }
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_render_table() {
        let content = render_table(vec![vec!["a", "1"], vec!["b", "2"]]);
        assert_eq!(content, "a;1\nb;2\n");
    }

    #[test]
    fn test_writer_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let writer = ReportWriter::new(temp_dir.path().join("nested").join("nb_out"));

        let path = writer.write_table(vec![vec!["x", "y"]], "t.csv").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "x;y\n");
    }

    #[test]
    fn test_write_all_continues_after_failure() {
        let temp_dir = TempDir::new().unwrap();
        let writer = ReportWriter::new(temp_dir.path());
        // A directory where a file should go makes that single write fail.
        fs::create_dir(temp_dir.path().join("blocked.csv")).unwrap();

        let statuses = writer.write_all(&[
            Artifact::text("blocked.csv", "x"),
            Artifact::text("ok.csv", "y"),
        ]);

        assert!(!statuses[0].written);
        assert!(statuses[0].error.is_some());
        assert!(statuses[1].written);
        assert_eq!(fs::read_to_string(temp_dir.path().join("ok.csv")).unwrap(), "y");
    }
}
