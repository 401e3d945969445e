//! Utility modules
//!
//! This module contains utilities and helpers:
//! - Diagnostics for `--check` mode
//! - Document file access
//! - Error types and result types

pub mod diagnostics;
pub mod error;
pub mod files;

// Re-export commonly used items
pub use diagnostics::{
    check_headings, diagnostics_to_json, format_diagnostics, CheckResult, Diagnostic,
    DiagnosticLevel,
};
pub use error::{FixError, FixResult, LineChange, ResolveError, RewriteOutput};
pub use files::{read_source, same_file, write_output};
