//! Text analysis module for textclass.
//!
//! Turns raw document text into the normalized token sequences the
//! classifiers consume. An [`Analyzer`] combines one [`Tokenizer`] with a
//! chain of [`Filter`]s:
//!
//! ```text
//! Raw Text → Tokenizer → Lowercase → Stop Words → Document tokens
//! ```

pub mod analyzer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

// Re-export commonly used types
pub use analyzer::{Analyzer, PipelineAnalyzer, StandardAnalyzer};
pub use token::{Token, TokenStream};
pub use token_filter::Filter;
pub use tokenizer::Tokenizer;
