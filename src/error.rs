//! Error types for the textclass library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`ClassifyError`] enum. Configuration and data problems are reported
//! before any heavy computation starts; I/O errors can surface later while
//! artifacts are written.
//!
//! # Examples
//!
//! ```
//! use textclass::error::{ClassifyError, Result};
//!
//! fn check_k(k: usize) -> Result<()> {
//!     if k == 0 {
//!         return Err(ClassifyError::configuration("k must be at least 1"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_k(0).is_err());
//! ```

use std::io;

use thiserror::Error;

/// The main error type for classification runs.
#[derive(Error, Debug)]
pub enum ClassifyError {
    /// I/O errors (reading the corpus, writing artifacts)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid run configuration (missing input directory, bad `k`, ...)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The corpus cannot support the requested algorithm
    #[error("Data error: {0}")]
    Data(String),

    /// Analysis-related errors (tokenizer patterns, filters)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The run was cancelled between two phases
    #[error("Operation cancelled: {0}")]
    Cancelled(String),
}

/// Result type alias for operations that may fail with ClassifyError.
pub type Result<T> = std::result::Result<T, ClassifyError>;

impl ClassifyError {
    /// Create a new configuration error.
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        ClassifyError::Configuration(msg.into())
    }

    /// Create a new data error.
    pub fn data<S: Into<String>>(msg: S) -> Self {
        ClassifyError::Data(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        ClassifyError::Analysis(msg.into())
    }

    /// Create a new cancelled error.
    pub fn cancelled<S: Into<String>>(msg: S) -> Self {
        ClassifyError::Cancelled(msg.into())
    }

    /// Whether this error was raised before any computation started.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            ClassifyError::Configuration(_) | ClassifyError::Data(_) | ClassifyError::Analysis(_)
        )
    }
}
