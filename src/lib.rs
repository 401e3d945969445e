//! # texorpdf
//!
//! Makes LaTeX section headings safe for PDF bookmarks.
//!
//! Inline math in `\section{...}` and `\subsection{...}` headings cannot be
//! shown in a PDF outline. This crate wraps every such `$...$` span as
//! `\texorpdfstring{$...$}{text}`, where `text` is a plain Unicode rendering
//! of the formula.
//!
//! ## Features
//!
//! - **Built-in table**: ~250 formula mappings (Greek, operators, common expressions)
//! - **Learning**: answers for unknown formulas are kept in a JSON mapping file
//! - **Idempotent**: spans already inside `\texorpdfstring` are left alone
//! - **Pluggable**: unknown formulas go to a [`FormulaResolver`] (closure, fallback, terminal)
//! - **Check mode**: report what would change without touching anything
//!
//! ## Usage Examples
//!
//! ### One string, no questions asked
//!
//! ```rust
//! let fixed = texorpdf::fix_headings("\\section{Proof of $a \\leq b$}\n").unwrap();
//! assert_eq!(
//!     fixed,
//!     "\\section{Proof of \\texorpdfstring{$a \\leq b$}{a ≤ b}}\n"
//! );
//! ```
//!
//! ### Custom table and resolver
//!
//! ```rust
//! use texorpdf::{fix_headings_with, MappingStore, Resolution, ResolveError};
//!
//! let mut store = MappingStore::with_custom([("\\mathcal{H}", "H")]);
//! let mut ask = |formula: &str| -> Result<Resolution, ResolveError> {
//!     Ok(Resolution::Learn(formula.trim_start_matches('\\').to_uppercase()))
//! };
//!
//! let output = fix_headings_with(
//!     "\\subsection{$\\mathcal{H}$ and $\\foo$}",
//!     &mut store,
//!     &mut ask,
//! )
//! .unwrap();
//! assert_eq!(
//!     output.content,
//!     "\\subsection{\\texorpdfstring{$\\mathcal{H}$}{H} and \\texorpdfstring{$\\foo$}{FOO}}"
//! );
//! assert_eq!(store.resolve("\\foo"), Some("FOO"));
//! assert!(store.is_dirty());
//! ```

/// Core rewrite modules
pub mod core;

/// Data layer - built-in mappings and script tables
pub mod data;

/// Utility modules
pub mod utils;

// Re-export the rewrite engine
pub use core::{
    fallback_text, scan_math_spans, wrap_span, DocumentJob, FallbackResolver, FormulaResolver,
    HeadingRewriter, JobReport, MappingStore, MathSpan, Proposal, Resolution, Review,
    RewriteOptions, SpanScan, StrictResolver, TerminalPrompt, TextSource, DEFAULT_COMMANDS,
    DEFAULT_MAPPING_FILE,
};

// Re-export data modules
pub use data::symbols;

// Re-export utilities
pub use utils::diagnostics;
pub use utils::error::{FixError, FixResult, LineChange, ResolveError, RewriteOutput};
pub use utils::files;

/// Wrap heading math in `input` using the built-in table only
///
/// Unknown formulas get a heuristic rendering (see [`fallback_text`]).
/// Nothing is learned or saved.
pub fn fix_headings(input: &str) -> FixResult<String> {
    let mut store = MappingStore::new();
    let mut resolver = FallbackResolver::new();
    fix_headings_with(input, &mut store, &mut resolver).map(|output| output.content)
}

/// Wrap heading math in `input` with an explicit table and resolver
///
/// # Arguments
/// * `input` - LaTeX source, any number of lines
/// * `store` - mapping table; answers marked for learning are added to it
/// * `resolver` - consulted once per distinct unknown formula
///
/// # Returns
/// The rewritten text and one [`LineChange`] per modified line, or the
/// resolver's error if it refused a formula
pub fn fix_headings_with(
    input: &str,
    store: &mut MappingStore,
    resolver: &mut dyn FormulaResolver,
) -> FixResult<RewriteOutput> {
    HeadingRewriter::new(store, resolver).rewrite(input)
}

/// Fix headings and collect diagnostics
///
/// Returns the same text as [`fix_headings`] plus a check report taken on
/// the input before rewriting.
pub fn fix_headings_with_diagnostics(
    input: &str,
) -> FixResult<(String, diagnostics::CheckResult)> {
    let report =
        diagnostics::check_headings(input, &MappingStore::new(), &RewriteOptions::default());
    Ok((fix_headings(input)?, report))
}
