//! Core rewrite modules
//!
//! This module contains the heading rewrite engine and its collaborators:
//! - `mapping`: layered formula → text table with JSON persistence
//! - `heading`: heading detection, `$...$` scanning and wrapping
//! - `resolve`: the resolver trait and non-interactive implementations
//! - `fallback`: heuristic text for formulas nobody mapped
//! - `prompt`: terminal resolver that also confirms each change
//! - `document`: one file in, one file out, mappings saved afterwards

pub mod document;
pub mod fallback;
pub mod heading;
pub mod mapping;
pub mod prompt;
pub mod resolve;

pub use document::{DocumentJob, JobReport};
pub use fallback::fallback_text;
pub use heading::{
    scan_math_spans, wrap_span, HeadingRewriter, MathSpan, RewriteOptions, SpanScan,
    DEFAULT_COMMANDS,
};
pub use mapping::{MappingStore, DEFAULT_MAPPING_FILE};
pub use prompt::TerminalPrompt;
pub use resolve::{
    FallbackResolver, FormulaResolver, Proposal, Resolution, Review, StrictResolver, TextSource,
};
