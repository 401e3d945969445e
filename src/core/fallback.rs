//! Heuristic plain-text rendering of formulas with no mapping
//!
//! Used when nobody supplies text for an unknown formula. The result is meant
//! to be readable in a PDF outline, not faithful: known symbols become
//! Unicode, `\frac` and `\sqrt` become `/` and `√`, simple scripts become
//! Unicode super/subscripts, and whatever LaTeX is left gets stripped.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use super::mapping::MappingStore;
use crate::data::symbols::{to_script, SUBSCRIPTS, SUPERSCRIPTS};

/// Placeholder for the fraction slash, so operator spacing leaves it alone
const FRAC_MARK: &str = "⟨FRAC⟩";

const OPERATORS: [char; 7] = ['+', '-', '*', '/', '=', '<', '>'];

lazy_static! {
    // One level of nested braces inside each argument
    static ref FRAC: Regex = Regex::new(
        r"\\frac\{([^{}]*(?:\{[^{}]*\}[^{}]*)*)\}\{([^{}]*(?:\{[^{}]*\}[^{}]*)*)\}"
    )
    .unwrap();
    static ref SQRT: Regex = Regex::new(r"\\sqrt\{([^{}]*(?:\{[^{}]*\}[^{}]*)*)\}").unwrap();
    static ref SUPERSCRIPT: Regex = Regex::new(r"\^\{([^}]+)\}|\^([a-zA-Z0-9])").unwrap();
    static ref SUBSCRIPT: Regex = Regex::new(r"_\{([^}]+)\}|_([a-zA-Z0-9])").unwrap();
    static ref COMMAND: Regex = Regex::new(r"\\[a-zA-Z]+\*?").unwrap();
    static ref GROUP: Regex = Regex::new(r"\{([^{}]*)\}").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    static ref LEADING_OP: Regex = Regex::new(r"^\s*[+\-*/=<>]\s*").unwrap();
    static ref TRAILING_OP: Regex = Regex::new(r"\s*[+\-*/=<>]\s*$").unwrap();
    static ref SPACED_OP: Regex = Regex::new(r"\s*([+\-*/=<>])\s*").unwrap();
}

/// Render `formula` as bookmark text using the store's mappings
pub fn fallback_text(formula: &str, store: &MappingStore) -> String {
    // Table text is final; operator spacing would turn `a/b` into `a / b`
    if let Some(text) = store.resolve(formula) {
        return text.to_string();
    }

    let mut mappings = store.entries();
    // Longest first so `\int_0^\infty` wins over `\int`; stable for ties
    mappings.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

    let text = apply_mappings(formula, &mappings);
    let text = render_fractions(&text, &mappings);
    let text = render_roots(&text, &mappings);
    let text = render_scripts(&text);
    let text = strip_latex(&text);
    WHITESPACE.replace_all(&text, " ").trim().to_string()
}

fn apply_mappings(text: &str, mappings: &[(&str, &str)]) -> String {
    let mut result = text.to_string();
    for &(key, value) in mappings {
        if key.is_empty() || !result.contains(key) {
            continue;
        }
        result = if key.starts_with('\\') {
            replace_command(&result, key, value)
        } else {
            result.replace(key, value)
        };
    }
    result
}

/// Replace `command` only where it is not followed by another ASCII letter,
/// so `\in` does not eat the front of `\int`
fn replace_command(text: &str, command: &str, value: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find(command) {
        let end = pos + command.len();
        let continues = rest[end..]
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic());
        out.push_str(&rest[..pos]);
        out.push_str(if continues { command } else { value });
        rest = &rest[end..];
    }
    out.push_str(rest);
    out
}

fn squeeze(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

fn parenthesize_if(text: String, ops: &[char]) -> String {
    if text.contains(ops) {
        format!("({})", text)
    } else {
        text
    }
}

fn render_fractions(text: &str, mappings: &[(&str, &str)]) -> String {
    FRAC.replace_all(text, |caps: &Captures| {
        let num = squeeze(&apply_mappings(&caps[1], mappings));
        let den = squeeze(&apply_mappings(&caps[2], mappings));
        format!(
            "{}{}{}",
            parenthesize_if(num, &['+', '-', '*']),
            FRAC_MARK,
            parenthesize_if(den, &['+', '-', '*'])
        )
    })
    .into_owned()
}

fn render_roots(text: &str, mappings: &[(&str, &str)]) -> String {
    SQRT.replace_all(text, |caps: &Captures| {
        let content = squeeze(&apply_mappings(&caps[1], mappings));
        format!("√{}", parenthesize_if(content, &['+', '-', '*', '/']))
    })
    .into_owned()
}

fn render_scripts(text: &str) -> String {
    let script = |caps: &Captures| -> String {
        caps.get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str())
            .unwrap_or_default()
            .to_string()
    };
    let text = SUPERSCRIPT.replace_all(text, |caps: &Captures| {
        to_script(&script(caps), &SUPERSCRIPTS)
    });
    SUBSCRIPT
        .replace_all(&text, |caps: &Captures| to_script(&script(caps), &SUBSCRIPTS))
        .into_owned()
}

/// Collapse runs like `+ +` or `==` into a single operator
fn collapse_repeated_operators(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_op: Option<char> = None;
    let mut pending_space = String::new();
    for c in text.chars() {
        if c.is_whitespace() && last_op.is_some() {
            pending_space.push(c);
            continue;
        }
        if OPERATORS.contains(&c) && last_op == Some(c) {
            pending_space.clear();
            continue;
        }
        out.push_str(&pending_space);
        pending_space.clear();
        out.push(c);
        last_op = OPERATORS.contains(&c).then_some(c);
    }
    out.push_str(&pending_space);
    out
}

fn strip_latex(text: &str) -> String {
    let text = COMMAND.replace_all(text, "");
    let text = GROUP.replace_all(&text, "(${1})");
    let text = WHITESPACE.replace_all(&text, " ");
    let text = LEADING_OP.replace(&text, "");
    let text = TRAILING_OP.replace(&text, "");
    let mut text = collapse_repeated_operators(&text);

    // Fractions, roots and parenthesised groups already carry their own spacing
    let structured =
        (text.contains('(') && text.contains(')')) || text.contains('√') || text.contains(FRAC_MARK);
    if !structured {
        text = SPACED_OP.replace_all(&text, " ${1} ").into_owned();
    }

    let text = text.replace(FRAC_MARK, "/");
    WHITESPACE.replace_all(&text, " ").trim().to_string()
}
