//! One run over one document file
//!
//! Order matters: the input is read before the mapping file is touched, and
//! mappings are saved only after the output was written successfully.

use std::path::{Path, PathBuf};

use super::heading::{HeadingRewriter, RewriteOptions};
use super::mapping::{MappingStore, DEFAULT_MAPPING_FILE};
use super::resolve::FormulaResolver;
use crate::utils::error::{FixResult, RewriteOutput};
use crate::utils::files::{read_source, same_file, write_output};

/// Paths and settings for rewriting one file
#[derive(Debug, Clone)]
pub struct DocumentJob {
    input: PathBuf,
    output: Option<PathBuf>,
    mappings: PathBuf,
    options: RewriteOptions,
    dry_run: bool,
}

/// What a [`DocumentJob`] did
#[derive(Debug)]
pub struct JobReport {
    pub rewrite: RewriteOutput,
    /// Where the document was written, if it was
    pub written: Option<PathBuf>,
    /// Whether the mapping file was rewritten
    pub mappings_saved: bool,
}

impl DocumentJob {
    /// Rewrite `input` in place using `math_mappings.json`
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: None,
            mappings: PathBuf::from(DEFAULT_MAPPING_FILE),
            options: RewriteOptions::default(),
            dry_run: false,
        }
    }

    /// Write to `path` instead of overwriting the input
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    pub fn with_mappings(mut self, path: impl Into<PathBuf>) -> Self {
        self.mappings = path.into();
        self
    }

    pub fn with_options(mut self, options: RewriteOptions) -> Self {
        self.options = options;
        self
    }

    /// Rewrite and report, but write neither the document nor the mappings
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn output_path(&self) -> &Path {
        self.output.as_deref().unwrap_or(&self.input)
    }

    pub fn mappings_path(&self) -> &Path {
        &self.mappings
    }

    pub fn run(&self, resolver: &mut dyn FormulaResolver) -> FixResult<JobReport> {
        let text = read_source(&self.input)?;
        let mut store = MappingStore::load(&self.mappings)?;

        let rewrite = HeadingRewriter::new(&mut store, resolver)
            .with_options(self.options.clone())
            .rewrite(&text)?;

        let mut report = JobReport {
            rewrite,
            written: None,
            mappings_saved: false,
        };
        if self.dry_run {
            return Ok(report);
        }

        // An unchanged document is only rewritten when it goes somewhere new
        let destination = self.output_path();
        if report.rewrite.has_changes() || !same_file(&self.input, destination) {
            write_output(destination, &report.rewrite.content)?;
            report.written = Some(destination.to_path_buf());
        } else {
            log::info!("no heading changes in {}", self.input.display());
        }

        report.mappings_saved = store.save(&self.mappings)?;
        Ok(report)
    }
}
