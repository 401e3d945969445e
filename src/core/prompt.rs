//! Interactive resolution on a terminal
//!
//! Generic over the reader and writer so it can be driven from tests.

use std::io::{self, BufRead, Write};

use super::fallback::fallback_text;
use super::mapping::MappingStore;
use super::resolve::{FormulaResolver, Proposal, Resolution, Review, TextSource};
use crate::utils::error::ResolveError;

/// Asks the user for unknown formulas and confirms each change
pub struct TerminalPrompt<R, W> {
    input: R,
    output: W,
}

impl TerminalPrompt<io::StdinLock<'static>, io::Stderr> {
    /// Prompt on stderr, read answers from stdin
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }

    /// Print `question` and read one trimmed line; `None` at end of input
    fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;
        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(answer.trim().to_string()))
    }
}

impl<R: BufRead, W: Write> FormulaResolver for TerminalPrompt<R, W> {
    /// A typed answer is learned; an empty answer (or EOF) uses the fallback
    /// rendering for this run only
    fn resolve(&mut self, formula: &str, store: &MappingStore) -> Result<Resolution, ResolveError> {
        let fallback = fallback_text(formula, store);
        writeln!(self.output, "\nUnknown math formula found: ${}$", formula)?;
        let question = format!(
            "Enter text for '${}$' (press Enter to use \"{}\"): ",
            formula, fallback
        );

        match self.ask(&question)? {
            Some(answer) if !answer.is_empty() => {
                writeln!(self.output, "Added mapping: ${}$ -> {}", formula, answer)?;
                Ok(Resolution::Learn(answer))
            }
            _ => Ok(Resolution::Once(fallback)),
        }
    }

    fn review(&mut self, proposal: &Proposal<'_>) -> Result<Review, ResolveError> {
        // The user just chose this text
        if proposal.source == TextSource::Resolver {
            return Ok(Review::Accept);
        }

        writeln!(self.output, "\n--- Line {} ---", proposal.line_number)?;
        writeln!(self.output, "Original: {}", proposal.line.trim())?;
        writeln!(self.output, "Math formula found: ${}$", proposal.formula)?;
        writeln!(self.output, "Default mapping: {}", proposal.text)?;

        loop {
            let Some(answer) = self.ask("Apply this change? [Y/n/c(ustom)]: ")? else {
                return Ok(Review::Accept);
            };
            match answer.to_lowercase().as_str() {
                "" | "y" | "yes" => return Ok(Review::Accept),
                "n" | "no" => return Ok(Review::Skip),
                "c" | "custom" => {
                    let question = format!("Enter custom mapping for '${}$': ", proposal.formula);
                    return match self.ask(&question)? {
                        Some(custom) if !custom.is_empty() => Ok(Review::Replace(custom)),
                        _ => {
                            writeln!(
                                self.output,
                                "No custom mapping provided, skipping change."
                            )?;
                            Ok(Review::Skip)
                        }
                    };
                }
                _ => writeln!(
                    self.output,
                    "Please enter 'y' (yes), 'n' (no), or 'c' (custom)"
                )?,
            }
        }
    }
}
