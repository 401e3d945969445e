//! Error handling for heading rewrites
//!
//! This module provides a unified error type and result type for loading
//! mappings, reading and writing documents, and resolving unknown formulas.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors; each aborts the run and is reported once
#[derive(Error, Debug)]
pub enum FixError {
    /// Input document missing or unreadable
    #[error("could not read input file '{}': {source}", path.display())]
    InputRead { path: PathBuf, source: io::Error },

    /// Mapping file exists but could not be read
    #[error("could not read mapping file '{}': {source}", path.display())]
    MappingRead { path: PathBuf, source: io::Error },

    /// Mapping file is not a JSON object of strings
    #[error("invalid mapping file '{}': {source}", path.display())]
    MappingLoad {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("could not encode mappings: {0}")]
    MappingEncode(#[source] serde_json::Error),

    #[error("could not write mapping file '{}': {source}", path.display())]
    MappingWrite { path: PathBuf, source: io::Error },

    #[error("could not encode check report: {0}")]
    Report(#[source] serde_json::Error),

    /// Destination not writable
    #[error("could not write output file '{}': {source}", path.display())]
    OutputWrite { path: PathBuf, source: io::Error },

    /// The resolver refused or failed to supply text for a formula
    #[error(transparent)]
    Unresolved(#[from] ResolveError),
}

/// Result type for rewrite operations
pub type FixResult<T> = Result<T, FixError>;

/// Failure of a formula resolver
#[derive(Error, Debug)]
pub enum ResolveError {
    /// The resolver declines to render this formula
    #[error("no mapping for formula '${formula}$'")]
    Rejected { formula: String },

    /// Prompting the user failed
    #[error("prompt failed: {0}")]
    Prompt(#[from] io::Error),
}

impl ResolveError {
    pub fn rejected(formula: impl Into<String>) -> Self {
        ResolveError::Rejected {
            formula: formula.into(),
        }
    }
}

/// A single rewritten heading line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineChange {
    /// Line number (1-indexed)
    pub line: usize,
    pub before: String,
    pub after: String,
}

impl fmt::Display for LineChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Line {}: Modified section heading", self.line)?;
        writeln!(f, "  Before: {}", self.before.trim())?;
        write!(f, "  After:  {}", self.after.trim())
    }
}

/// Rewrite output with the list of changed lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOutput {
    /// The rewritten document
    pub content: String,
    /// Every heading line that changed, in document order
    pub changes: Vec<LineChange>,
}

impl RewriteOutput {
    pub fn new(content: String) -> Self {
        Self {
            content,
            changes: Vec::new(),
        }
    }

    pub fn with_changes(content: String, changes: Vec<LineChange>) -> Self {
        Self { content, changes }
    }

    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }
}
