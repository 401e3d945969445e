//! The collaborator the rewriter calls out to
//!
//! A [`FormulaResolver`] supplies text for formulas the mapping table does
//! not know (called at most once per distinct formula per run) and may
//! review each wrap before it is applied.
//!
//! Implementations:
//! - closures `FnMut(&str) -> Result<Resolution, ResolveError>`
//! - [`FallbackResolver`]: heuristic rendering, no questions asked
//! - [`StrictResolver`]: refuses, aborting the run
//! - `TerminalPrompt` (in `core::prompt`): asks on a terminal

use super::fallback::fallback_text;
use super::mapping::MappingStore;
use crate::utils::error::ResolveError;

/// Text for an unknown formula, and whether to keep it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Store in the mapping file
    Learn(String),
    /// Use for the rest of this run only
    Once(String),
}

impl Resolution {
    pub fn text(&self) -> &str {
        match self {
            Resolution::Learn(text) | Resolution::Once(text) => text,
        }
    }
}

/// Supplies bookmark text for formulas missing from the table
pub trait FormulaResolver {
    /// Resolve `formula` (delimiters excluded). `store` gives read access to
    /// the current table, e.g. for building a fallback rendering.
    fn resolve(&mut self, formula: &str, store: &MappingStore)
        -> Result<Resolution, ResolveError>;

    /// Confirm a wrap before it is applied. Accepts everything by default.
    fn review(&mut self, _proposal: &Proposal<'_>) -> Result<Review, ResolveError> {
        Ok(Review::Accept)
    }
}

impl<F> FormulaResolver for F
where
    F: FnMut(&str) -> Result<Resolution, ResolveError>,
{
    fn resolve(&mut self, formula: &str, _store: &MappingStore) -> Result<Resolution, ResolveError> {
        self(formula)
    }
}

/// Renders unknown formulas with [`fallback_text`]
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackResolver {
    persist: bool,
}

impl FallbackResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Save generated text to the mapping file instead of using it once
    pub fn persisting(mut self) -> Self {
        self.persist = true;
        self
    }
}

impl FormulaResolver for FallbackResolver {
    fn resolve(&mut self, formula: &str, store: &MappingStore) -> Result<Resolution, ResolveError> {
        let text = fallback_text(formula, store);
        log::debug!("fallback for ${}$ -> {}", formula, text);
        Ok(if self.persist {
            Resolution::Learn(text)
        } else {
            Resolution::Once(text)
        })
    }
}

/// Fails on any unknown formula
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictResolver;

impl FormulaResolver for StrictResolver {
    fn resolve(&mut self, formula: &str, _store: &MappingStore) -> Result<Resolution, ResolveError> {
        Err(ResolveError::rejected(formula))
    }
}

/// Where the proposed text came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSource {
    /// Found in the mapping table
    Mapping,
    /// Just supplied by the resolver
    Resolver,
}

/// A wrap awaiting review
#[derive(Debug, Clone, Copy)]
pub struct Proposal<'a> {
    /// Line number (1-indexed)
    pub line_number: usize,
    /// The heading line as it was read
    pub line: &'a str,
    /// Formula without delimiters
    pub formula: &'a str,
    pub text: &'a str,
    pub source: TextSource,
}

/// Reviewer verdict for one span
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Review {
    Accept,
    /// Leave the span unwrapped
    Skip,
    /// Wrap with this text instead, and learn it
    Replace(String),
}
