//! Heading rewriter
//!
//! Finds `$...$` spans in `\section{...}` / `\subsection{...}` lines and
//! wraps each as `\texorpdfstring{$...$}{text}`, where `text` comes from the
//! [`MappingStore`] or, for unknown formulas, from a [`FormulaResolver`].
//!
//! ## Example
//!
//! ```rust
//! use texorpdf::{FallbackResolver, HeadingRewriter, MappingStore};
//!
//! let mut store = MappingStore::new();
//! let mut resolver = FallbackResolver::new();
//! let mut rewriter = HeadingRewriter::new(&mut store, &mut resolver);
//! let line = rewriter.rewrite_line(1, r"\section{The $\alpha$ decay}").unwrap();
//! assert_eq!(line, r"\section{The \texorpdfstring{$\alpha$}{α} decay}");
//! ```

use lazy_static::lazy_static;
use regex::Regex;

use super::mapping::MappingStore;
use super::resolve::{FormulaResolver, Proposal, Resolution, Review, TextSource};
use crate::utils::error::{FixResult, LineChange, RewriteOutput};

const TEXORPDFSTRING: &str = "\\texorpdfstring";

/// Heading commands rewritten when nothing else is configured
pub const DEFAULT_COMMANDS: [&str; 2] = ["section", "subsection"];

lazy_static! {
    static ref DEFAULT_HEADING: Regex = heading_pattern(DEFAULT_COMMANDS.iter().copied());
}

fn heading_pattern<'a>(commands: impl IntoIterator<Item = &'a str>) -> Regex {
    let names: Vec<String> = commands.into_iter().map(regex::escape).collect();
    Regex::new(&format!(r"^\s*\\(?:{})\s*\{{", names.join("|")))
        .expect("escaped command names form a valid pattern")
}

/// Rewrite options
#[derive(Debug, Clone)]
pub struct RewriteOptions {
    commands: Vec<String>,
    heading: Regex,
}

impl Default for RewriteOptions {
    fn default() -> Self {
        Self {
            commands: DEFAULT_COMMANDS.iter().map(|c| c.to_string()).collect(),
            heading: DEFAULT_HEADING.clone(),
        }
    }
}

impl RewriteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also treat `\name{...}` lines as headings, e.g. `subsubsection`.
    /// A leading backslash is accepted and ignored.
    pub fn with_command(mut self, name: &str) -> Self {
        let name = name.trim().trim_start_matches('\\');
        if !name.is_empty() && !self.commands.iter().any(|c| c == name) {
            self.commands.push(name.to_string());
            self.heading = heading_pattern(self.commands.iter().map(String::as_str));
        }
        self
    }

    /// Heading command names, without backslashes
    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    /// Whether `line` starts (after indentation) with a heading command and `{`
    pub fn is_heading(&self, line: &str) -> bool {
        self.heading.is_match(line)
    }
}

/// An inline `$...$` formula within one line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MathSpan<'a> {
    /// Byte offset of the opening `$`
    pub start: usize,
    /// Byte offset just past the closing `$`
    pub end: usize,
    /// The span including both delimiters
    pub raw: &'a str,
    /// The formula between the delimiters
    pub formula: &'a str,
    /// Inside an argument of an existing `\texorpdfstring`
    pub protected: bool,
}

/// Result of scanning one line for math spans
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpanScan<'a> {
    pub spans: Vec<MathSpan<'a>>,
    /// Byte offset of a trailing `$` with no partner
    pub unterminated: Option<usize>,
}

impl<'a> SpanScan<'a> {
    /// Spans the rewriter would wrap: non-empty and not already protected
    pub fn wrappable(&self) -> impl Iterator<Item = &MathSpan<'a>> {
        self.spans
            .iter()
            .filter(|span| !span.protected && !span.formula.is_empty())
    }
}

/// Pair unescaped `$` delimiters left to right.
///
/// Braces are tracked so spans inside either argument of `\texorpdfstring`
/// come back `protected`. An argument that never closes protects the rest of
/// the line. `\$`, `\{`, `\}` and `\\` are escapes, not structure.
pub fn scan_math_spans(line: &str) -> SpanScan<'_> {
    let bytes = line.as_bytes();
    let mut scan = SpanScan::default();
    // One entry per open brace: is it a \texorpdfstring argument?
    let mut groups: Vec<bool> = Vec::new();
    // Depth and argument count of a \texorpdfstring still waiting for `{`
    let mut expecting: Option<(usize, u8)> = None;
    let mut open: Option<(usize, bool)> = None;

    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => {
                let rest = &line[i + 1..];
                let name = &TEXORPDFSTRING[1..];
                if rest.starts_with(name)
                    && !rest[name.len()..].starts_with(|c: char| c.is_ascii_alphabetic())
                {
                    expecting = Some((groups.len(), 2));
                    i += TEXORPDFSTRING.len();
                    continue;
                }
                if matches!(expecting, Some((depth, _)) if depth == groups.len()) {
                    expecting = None;
                }
                let escape = matches!(bytes.get(i + 1), Some(b'$' | b'{' | b'}' | b'\\'));
                i += if escape { 2 } else { 1 };
                continue;
            }
            b'{' => {
                let is_arg = match expecting {
                    Some((depth, remaining)) if depth == groups.len() => {
                        expecting = (remaining > 1).then_some((depth, remaining - 1));
                        true
                    }
                    _ => false,
                };
                groups.push(is_arg);
            }
            b'}' => {
                groups.pop();
                if matches!(expecting, Some((depth, _)) if depth > groups.len()) {
                    expecting = None;
                }
            }
            b'$' => match open.take() {
                Some((start, protected)) => scan.spans.push(MathSpan {
                    start,
                    end: i + 1,
                    raw: &line[start..=i],
                    formula: &line[start + 1..i],
                    protected,
                }),
                None => open = Some((i, groups.iter().any(|&arg| arg))),
            },
            b if b.is_ascii_whitespace() => {}
            _ => {
                if matches!(expecting, Some((depth, _)) if depth == groups.len()) {
                    expecting = None;
                }
            }
        }
        i += 1;
    }

    scan.unterminated = open.map(|(start, _)| start);
    scan
}

/// `\texorpdfstring{<raw>}{<text>}`
pub fn wrap_span(raw: &str, text: &str) -> String {
    format!("{}{{{}}}{{{}}}", TEXORPDFSTRING, raw, text)
}

/// Rewrites heading lines, resolving formulas through a [`MappingStore`]
pub struct HeadingRewriter<'a> {
    store: &'a mut MappingStore,
    resolver: &'a mut dyn FormulaResolver,
    options: RewriteOptions,
}

impl<'a> HeadingRewriter<'a> {
    pub fn new(store: &'a mut MappingStore, resolver: &'a mut dyn FormulaResolver) -> Self {
        Self {
            store,
            resolver,
            options: RewriteOptions::default(),
        }
    }

    pub fn with_options(mut self, options: RewriteOptions) -> Self {
        self.options = options;
        self
    }

    /// Rewrite a whole document, keeping line endings exactly as they were
    pub fn rewrite(&mut self, text: &str) -> FixResult<RewriteOutput> {
        let mut content = String::with_capacity(text.len());
        let mut changes = Vec::new();

        for (index, line) in text.split_inclusive('\n').enumerate() {
            let rewritten = self.rewrite_line(index + 1, line)?;
            if rewritten != line {
                changes.push(LineChange {
                    line: index + 1,
                    before: strip_line_ending(line).to_string(),
                    after: strip_line_ending(&rewritten).to_string(),
                });
            }
            content.push_str(&rewritten);
        }

        Ok(RewriteOutput::with_changes(content, changes))
    }

    /// Rewrite one line; non-heading lines come back unchanged
    pub fn rewrite_line(&mut self, line_number: usize, line: &str) -> FixResult<String> {
        if !self.options.is_heading(line) {
            return Ok(line.to_string());
        }

        let scan = scan_math_spans(line);
        let mut out = String::with_capacity(line.len());
        let mut cursor = 0;

        for span in &scan.spans {
            if span.formula.is_empty() {
                continue;
            }
            if span.protected {
                log::debug!(
                    "line {}: {} already inside \\texorpdfstring",
                    line_number,
                    span.raw
                );
                continue;
            }
            let Some(text) = self.text_for(line_number, line, span.formula)? else {
                continue;
            };
            out.push_str(&line[cursor..span.start]);
            out.push_str(&wrap_span(span.raw, &text));
            cursor = span.end;
        }

        if let Some(offset) = scan.unterminated {
            log::warn!(
                "line {}: unmatched `$` at column {} left as is",
                line_number,
                line[..offset].chars().count() + 1
            );
        }

        out.push_str(&line[cursor..]);
        Ok(out)
    }

    /// Bookmark text for one formula, or `None` if the resolver's review skips it
    fn text_for(
        &mut self,
        line_number: usize,
        line: &str,
        formula: &str,
    ) -> FixResult<Option<String>> {
        let (text, source) = match self.store.resolve(formula) {
            Some(text) => (text.to_string(), TextSource::Mapping),
            None => {
                let resolution = self.resolver.resolve(formula, &*self.store)?;
                let text = resolution.text().to_string();
                match resolution {
                    Resolution::Learn(text) => self.store.learn(formula, text),
                    Resolution::Once(text) => self.store.remember(formula, text),
                }
                (text, TextSource::Resolver)
            }
        };

        let proposal = Proposal {
            line_number,
            line,
            formula,
            text: &text,
            source,
        };
        match self.resolver.review(&proposal)? {
            Review::Accept => Ok(Some(text)),
            Review::Skip => {
                log::debug!("line {}: skipped ${}$", line_number, formula);
                Ok(None)
            }
            Review::Replace(custom) => {
                self.store.learn(formula, custom.clone());
                Ok(Some(custom))
            }
        }
    }
}

fn strip_line_ending(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::resolve::{FallbackResolver, StrictResolver};
    use crate::utils::error::{FixError, ResolveError};
    use pretty_assertions::assert_eq;

    fn rewrite_with(store: &mut MappingStore, line: &str) -> String {
        let mut resolver = StrictResolver;
        HeadingRewriter::new(store, &mut resolver)
            .rewrite_line(1, line)
            .unwrap()
    }

    fn rewrite(line: &str) -> String {
        rewrite_with(&mut MappingStore::new(), line)
    }

    mod scanning {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_single_span() {
            let scan = scan_math_spans(r"\section{A $\alpha$ B}");
            assert_eq!(scan.spans.len(), 1);
            let span = scan.spans[0];
            assert_eq!(span.raw, r"$\alpha$");
            assert_eq!(span.formula, r"\alpha");
            assert_eq!((span.start, span.end), (11, 19));
            assert!(!span.protected);
            assert_eq!(scan.unterminated, None);
        }

        #[test]
        fn test_odd_dollar_is_unterminated() {
            let scan = scan_math_spans(r"\section{$a$ and $b}");
            assert_eq!(scan.spans.len(), 1);
            assert_eq!(scan.unterminated, Some(17));
        }

        #[test]
        fn test_escaped_dollar_is_not_a_delimiter() {
            let scan = scan_math_spans(r"\section{Costs \$5 and $x$}");
            assert_eq!(scan.spans.len(), 1);
            assert_eq!(scan.spans[0].formula, "x");
        }

        #[test]
        fn test_double_backslash_does_not_escape() {
            let scan = scan_math_spans(r"\section{a\\$x$}");
            assert_eq!(scan.spans.len(), 1);
            assert_eq!(scan.spans[0].formula, "x");
        }

        #[test]
        fn test_protected_in_first_argument() {
            let scan = scan_math_spans(r"\section{\texorpdfstring{$\alpha$}{a} and $\beta$}");
            assert_eq!(scan.spans.len(), 2);
            assert!(scan.spans[0].protected);
            assert!(!scan.spans[1].protected);
        }

        #[test]
        fn test_protected_in_second_argument() {
            let scan = scan_math_spans(r"\section{\texorpdfstring {$x$} {$y$}}");
            assert!(scan.spans.iter().all(|s| s.protected));
        }

        #[test]
        fn test_unterminated_texorpdfstring_protects_rest() {
            let scan = scan_math_spans(r"\section{\texorpdfstring{$x$ and $y$");
            assert_eq!(scan.spans.len(), 2);
            assert!(scan.spans.iter().all(|s| s.protected));
        }

        #[test]
        fn test_group_after_other_text_is_not_an_argument() {
            let scan = scan_math_spans(r"\section{\texorpdfstring{a}{b} x {$y$}}");
            assert_eq!(scan.spans.len(), 1);
            assert!(!scan.spans[0].protected);
        }

        #[test]
        fn test_similar_command_is_not_texorpdfstring() {
            let scan = scan_math_spans(r"\section{\texorpdfstringx{$y$}}");
            assert!(!scan.spans[0].protected);
        }

        #[test]
        fn test_escaped_braces_ignored() {
            let scan = scan_math_spans(r"\section{\texorpdfstring{\}$x$}{x} $y$}");
            assert!(scan.spans[0].protected);
            assert!(!scan.spans[1].protected);
        }

        #[test]
        fn test_wrappable_skips_empty() {
            let scan = scan_math_spans(r"\section{Test $$ formula}");
            assert_eq!(scan.spans.len(), 1);
            assert_eq!(scan.wrappable().count(), 0);
        }
    }

    mod options {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_default_commands() {
            let options = RewriteOptions::default();
            assert!(options.is_heading(r"\section{Intro}"));
            assert!(options.is_heading(r"\subsection{Intro}"));
            assert!(options.is_heading("  \\section  {Intro}"));
            assert!(!options.is_heading(r"\subsubsection{Intro}"));
            assert!(!options.is_heading(r"\chapter{Intro}"));
            assert!(!options.is_heading(r"\section*{Intro}"));
            assert!(!options.is_heading(r"\sectionmark{Intro}"));
            assert!(!options.is_heading(r"Text \section{Intro}"));
        }

        #[test]
        fn test_extra_command() {
            let options = RewriteOptions::new()
                .with_command("\\subsubsection")
                .with_command("subsubsection");
            assert_eq!(options.commands().len(), 3);
            assert!(options.is_heading(r"\subsubsection{Intro}"));
            assert!(options.is_heading(r"\section{Intro}"));
        }
    }

    #[test]
    fn test_wraps_known_formula() {
        let mut store = MappingStore::with_custom([("\\alpha", "α")]);
        assert_eq!(
            rewrite_with(&mut store, r"\section{A $\alpha$ B}"),
            r"\section{A \texorpdfstring{$\alpha$}{α} B}"
        );
    }

    #[test]
    fn test_default_mapping_scenario() {
        assert_eq!(
            rewrite(r"\subsection{The $x^2$ function}"),
            r"\subsection{The \texorpdfstring{$x^2$}{x²} function}"
        );
    }

    #[test]
    fn test_two_spans_on_one_line() {
        assert_eq!(
            rewrite(r"\section{$\alpha$ and $\beta$}"),
            r"\section{\texorpdfstring{$\alpha$}{α} and \texorpdfstring{$\beta$}{β}}"
        );
    }

    #[test]
    fn test_heading_without_math_unchanged() {
        let line = r"\section{Introduction}";
        assert_eq!(rewrite(line), line);
    }

    #[test]
    fn test_non_heading_unchanged() {
        for line in [
            r"This is text with $\alpha$ formula",
            r"\begin{equation} $\alpha$ \end{equation}",
            r"\chapter{Introduction to $\alpha$ particles}",
        ] {
            assert_eq!(rewrite(line), line);
        }
    }

    #[test]
    fn test_already_wrapped_is_idempotent() {
        let line = r"\section{Test \texorpdfstring{$\alpha$}{α} particles}";
        assert_eq!(rewrite(line), line);

        let once = rewrite(r"\section{$\alpha$ and $\beta$}");
        assert_eq!(rewrite(&once), once);
    }

    #[test]
    fn test_malformed_line_unchanged() {
        let line = r"\subsection{Odd $delimiter}";
        assert_eq!(rewrite(line), line);
        let line = r"\section{Cost is $5}";
        assert_eq!(rewrite(line), line);
    }

    #[test]
    fn test_whitespace_preserved() {
        assert_eq!(
            rewrite(r"  \section  {  Introduction to $\alpha$ particles  }  "),
            r"  \section  {  Introduction to \texorpdfstring{$\alpha$}{α} particles  }  "
        );
    }

    #[test]
    fn test_nested_braces_in_title() {
        assert_eq!(
            rewrite(r"\section{Test $\frac{a}{b}$ with {nested} braces}"),
            r"\section{Test \texorpdfstring{$\frac{a}{b}$}{a/b} with {nested} braces}"
        );
    }

    #[test]
    fn test_unknown_formula_resolved_once() {
        let mut store = MappingStore::new();
        let mut calls = Vec::new();
        let mut resolver = |formula: &str| {
            calls.push(formula.to_string());
            Ok::<_, ResolveError>(Resolution::Learn("F".to_string()))
        };
        let output = HeadingRewriter::new(&mut store, &mut resolver)
            .rewrite("\\section{$\\foo$}\n\\subsection{$\\foo$ again $\\foo$}\n")
            .unwrap();

        assert_eq!(calls, vec!["\\foo".to_string()]);
        assert_eq!(
            output.content,
            "\\section{\\texorpdfstring{$\\foo$}{F}}\n\
             \\subsection{\\texorpdfstring{$\\foo$}{F} again \\texorpdfstring{$\\foo$}{F}}\n"
        );
        assert!(store.is_dirty());
        assert_eq!(store.resolve("\\foo"), Some("F"));
    }

    #[test]
    fn test_once_resolution_not_persisted() {
        let mut store = MappingStore::new();
        let mut resolver = FallbackResolver::new();
        let output = HeadingRewriter::new(&mut store, &mut resolver)
            .rewrite("\\section{$\\alpha_1$ and $\\alpha_1$}")
            .unwrap();
        assert_eq!(
            output.content,
            "\\section{\\texorpdfstring{$\\alpha_1$}{α₁} and \\texorpdfstring{$\\alpha_1$}{α₁}}"
        );
        assert!(!store.is_dirty());
        assert_eq!(store.resolve("\\alpha_1"), Some("α₁"));
    }

    #[test]
    fn test_resolver_failure_aborts() {
        let mut store = MappingStore::new();
        let mut resolver = StrictResolver;
        let err = HeadingRewriter::new(&mut store, &mut resolver)
            .rewrite("\\section{$\\foo$}\n")
            .unwrap_err();
        assert!(matches!(
            err,
            FixError::Unresolved(ResolveError::Rejected { .. })
        ));
    }

    #[test]
    fn test_line_endings_and_changes() {
        let input = "\\documentclass{article}\r\n\\section{$\\alpha$}\r\ntext\n\\subsection{$\\beta$}";
        let mut store = MappingStore::new();
        let mut resolver = StrictResolver;
        let output = HeadingRewriter::new(&mut store, &mut resolver)
            .rewrite(input)
            .unwrap();
        assert_eq!(
            output.content,
            "\\documentclass{article}\r\n\\section{\\texorpdfstring{$\\alpha$}{α}}\r\ntext\n\\subsection{\\texorpdfstring{$\\beta$}{β}}"
        );
        let lines: Vec<usize> = output.changes.iter().map(|c| c.line).collect();
        assert_eq!(lines, vec![2, 4]);
        assert_eq!(output.changes[0].before, "\\section{$\\alpha$}");
    }

    #[test]
    fn test_custom_command() {
        let mut store = MappingStore::new();
        let mut resolver = StrictResolver;
        let mut rewriter = HeadingRewriter::new(&mut store, &mut resolver)
            .with_options(RewriteOptions::new().with_command("subsubsection"));
        assert_eq!(
            rewriter.rewrite_line(1, r"\subsubsection{$\pi$}").unwrap(),
            r"\subsubsection{\texorpdfstring{$\pi$}{π}}"
        );
    }

    /// Answers reviews from a script, refuses unknown formulas
    struct Scripted(Vec<Review>);

    impl FormulaResolver for Scripted {
        fn resolve(
            &mut self,
            formula: &str,
            _store: &MappingStore,
        ) -> Result<Resolution, ResolveError> {
            Err(ResolveError::rejected(formula))
        }

        fn review(&mut self, _proposal: &Proposal<'_>) -> Result<Review, ResolveError> {
            Ok(self.0.remove(0))
        }
    }

    #[test]
    fn test_review_skip_and_replace() {
        let mut store = MappingStore::new();
        let mut resolver = Scripted(vec![Review::Skip, Review::Replace("b".to_string())]);
        let line = HeadingRewriter::new(&mut store, &mut resolver)
            .rewrite_line(1, r"\section{$\alpha$ and $\beta$}")
            .unwrap();
        assert_eq!(line, r"\section{$\alpha$ and \texorpdfstring{$\beta$}{b}}");
        assert_eq!(store.resolve("\\beta"), Some("b"));
        assert!(store.is_dirty());
    }
}
