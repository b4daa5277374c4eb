//! Error types for erdgen operations.
//!
//! This module provides the main error type [`ErdgenError`]. Recoverable
//! modeling anomalies are never errors; they travel as warnings next to the
//! result instead.

use thiserror::Error;

use erdgen_parser::error::ParseError;

/// The main error type for erdgen operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the diagram source next to the diagnostics so
/// they can be rendered with source snippets (see [`crate::report`]).
#[derive(Debug, Error)]
pub enum ErdgenError {
    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ErdgenError {
    /// Create a new `Parse` error with the associated source document.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
