//! Error types for symlib operations.
//!
//! This module provides the main error type [`SymlibError`] which wraps
//! the error conditions that can occur while building a symbol library.

use std::io;

use thiserror::Error;

use symlib_parser::ParseError;

use crate::extract::ExtractError;

/// The main error type for symlib operations.
///
/// Failures tied to one rendered artifact are reported as
/// [`SymlibError::Extract`], which carries the artifact's identifier so a
/// batch can report it and move on.
#[derive(Debug, Error)]
pub enum SymlibError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Parse(#[from] ParseError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("failed to extract `{id}`: {source}")]
    Extract { id: String, source: ExtractError },
}

impl SymlibError {
    /// Create a new `Extract` error for the artifact `id`.
    pub fn new_extract_error(id: impl Into<String>, source: ExtractError) -> Self {
        Self::Extract {
            id: id.into(),
            source,
        }
    }
}
