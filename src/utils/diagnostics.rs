//! Heading diagnostics
//!
//! Reports what a rewrite would do without changing anything:
//!
//! - math spans that would be wrapped using a known mapping
//! - math spans with no mapping (the rewrite would have to ask)
//! - unterminated `$` delimiters, which are left alone
//!
//! ## Example
//!
//! ```rust
//! use texorpdf::diagnostics::check_headings;
//! use texorpdf::{MappingStore, RewriteOptions};
//!
//! let result = check_headings(
//!     r"\section{The $\foo$ map}",
//!     &MappingStore::new(),
//!     &RewriteOptions::default(),
//! );
//! assert_eq!(result.warnings, 1);
//! ```

use serde::Serialize;
use std::fmt;

use crate::core::heading::{scan_math_spans, RewriteOptions};
use crate::core::mapping::MappingStore;

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticLevel {
    /// A span that will be wrapped without any questions
    Info,
    /// Needs attention: unknown formula or stray delimiter
    Warning,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticLevel::Info => write!(f, "info"),
            DiagnosticLevel::Warning => write!(f, "warning"),
        }
    }
}

/// A single diagnostic message
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    /// Severity level
    pub level: DiagnosticLevel,
    /// Human-readable message
    pub message: String,
    /// Line number (1-indexed)
    pub line: Option<usize>,
    /// Column number (1-indexed, in characters)
    pub column: Option<usize>,
    /// Formula the diagnostic is about, if any
    pub formula: Option<String>,
    /// Relevant source text
    pub source_text: Option<String>,
    /// Suggested fix
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(level: DiagnosticLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            line: None,
            column: None,
            formula: None,
            source_text: None,
            suggestion: None,
        }
    }

    /// Add location information
    pub fn with_location(mut self, line: usize, column: usize) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    pub fn with_formula(mut self, formula: impl Into<String>) -> Self {
        self.formula = Some(formula.into());
        self
    }

    /// Add source text
    pub fn with_source(mut self, text: impl Into<String>) -> Self {
        self.source_text = Some(text.into());
        self
    }

    /// Add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: level: message
        //         --> line:column
        //         |
        //         | source text
        //         = help: suggestion

        write!(f, "{}: {}", self.level, self.message)?;

        if let (Some(line), Some(col)) = (self.line, self.column) {
            write!(f, "\n  --> line {}:{}", line, col)?;
        }

        if let Some(ref source) = self.source_text {
            write!(f, "\n  |\n  | {}", source)?;
        }

        if let Some(ref suggestion) = self.suggestion {
            write!(f, "\n  = help: {}", suggestion)?;
        }

        Ok(())
    }
}

/// Check result with summary
#[derive(Debug, Default, Serialize)]
pub struct CheckResult {
    /// All diagnostics
    pub diagnostics: Vec<Diagnostic>,
    /// Number of warnings
    pub warnings: usize,
    /// Number of info messages
    pub infos: usize,
}

impl CheckResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic
    pub fn add(&mut self, diag: Diagnostic) {
        match diag.level {
            DiagnosticLevel::Warning => self.warnings += 1,
            DiagnosticLevel::Info => self.infos += 1,
        }
        self.diagnostics.push(diag);
    }

    /// Check if there are any issues at all
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Number of spans a rewrite would wrap
    pub fn pending_rewrites(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.formula.is_some())
            .count()
    }

    /// Get summary string
    pub fn summary(&self) -> String {
        let pending = self.pending_rewrites();
        let mut parts = Vec::new();
        if pending > 0 {
            parts.push(format!(
                "{} formula{} to wrap",
                pending,
                if pending == 1 { "" } else { "s" }
            ));
        }
        if self.warnings > 0 {
            parts.push(format!(
                "{} warning{}",
                self.warnings,
                if self.warnings == 1 { "" } else { "s" }
            ));
        }
        if parts.is_empty() {
            "headings are bookmark-safe".to_string()
        } else {
            parts.join(", ")
        }
    }
}

/// Check every heading in `text` against `store`
pub fn check_headings(text: &str, store: &MappingStore, options: &RewriteOptions) -> CheckResult {
    let mut result = CheckResult::new();

    for (index, line) in text.lines().enumerate() {
        if !options.is_heading(line) {
            continue;
        }
        let line_number = index + 1;
        let column = |offset: usize| line[..offset].chars().count() + 1;
        let scan = scan_math_spans(line);

        for span in scan.wrappable() {
            let diag = match store.resolve(span.formula) {
                Some(text) => Diagnostic::new(
                    DiagnosticLevel::Info,
                    format!("{} will be wrapped as \"{}\"", span.raw, text),
                ),
                None => Diagnostic::new(
                    DiagnosticLevel::Warning,
                    format!("no mapping for {}", span.raw),
                )
                .with_suggestion(format!(
                    "add \"{}\" to the mapping file or run interactively",
                    span.formula.replace('\\', "\\\\")
                )),
            };
            result.add(
                diag.with_location(line_number, column(span.start))
                    .with_formula(span.formula)
                    .with_source(line.trim()),
            );
        }

        if let Some(offset) = scan.unterminated {
            result.add(
                Diagnostic::new(DiagnosticLevel::Warning, "unterminated `$` in heading")
                    .with_location(line_number, column(offset))
                    .with_source(line.trim())
                    .with_suggestion("close the formula or escape the dollar sign as `\\$`"),
            );
        }
    }

    result
}

/// Format diagnostics for display
pub fn format_diagnostics(result: &CheckResult, use_color: bool) -> String {
    let mut output = String::new();

    for diag in &result.diagnostics {
        if use_color {
            let color = match diag.level {
                DiagnosticLevel::Warning => "\x1b[33m", // Yellow
                DiagnosticLevel::Info => "\x1b[34m",    // Blue
            };
            output.push_str(color);
            output.push_str(&format!("{}", diag));
            output.push_str("\x1b[0m\n\n");
        } else {
            output.push_str(&format!("{}\n\n", diag));
        }
    }

    // Summary
    if use_color {
        if result.warnings > 0 {
            output.push_str("\x1b[33m");
        } else {
            output.push_str("\x1b[32m");
        }
    }

    output.push_str(&format!("Summary: {}", result.summary()));

    if use_color {
        output.push_str("\x1b[0m");
    }

    output
}

/// Machine-readable form of a check, one JSON object
pub fn diagnostics_to_json(result: &CheckResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(result)
}
