//! texorpdf CLI - make LaTeX heading math safe for PDF bookmarks

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;
#[cfg(feature = "cli")]
use texorpdf::{
    diagnostics::{check_headings, diagnostics_to_json, format_diagnostics},
    files::read_source,
    DocumentJob, FallbackResolver, FixError, FixResult, FormulaResolver, MappingStore,
    RewriteOptions, StrictResolver, TerminalPrompt, DEFAULT_MAPPING_FILE,
};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "texorpdf")]
#[command(version)]
#[command(
    about = "Wrap math in \\section/\\subsection headings with \\texorpdfstring",
    long_about = None
)]
struct Cli {
    /// LaTeX file to fix
    input: PathBuf,

    /// Output file path (overwrites the input if not provided)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON file with custom formula mappings
    #[arg(short, long, default_value = DEFAULT_MAPPING_FILE)]
    mappings: PathBuf,

    /// Never ask, including for unknown formulas: apply every change and
    /// render formulas without a mapping with the built-in fallback (not saved)
    #[arg(short = 'y', long)]
    yes: bool,

    /// Fail on the first formula without a mapping
    #[arg(long, conflicts_with = "yes")]
    strict: bool,

    /// Additional heading command to process (repeatable, e.g. --command chapter)
    #[arg(long = "command", value_name = "NAME")]
    commands: Vec<String>,

    /// Check mode - report what would change without writing anything
    #[arg(long)]
    check: bool,

    /// Print the check report as JSON
    #[arg(long, requires = "check")]
    json: bool,

    /// Rewrite and print the changes, but write no files
    #[arg(long)]
    dry_run: bool,

    /// Quiet mode: only print errors
    #[arg(short, long)]
    quiet: bool,

    /// Disable colored output (for check mode)
    #[arg(long)]
    no_color: bool,
}

#[cfg(feature = "cli")]
fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.quiet { "error" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();

    let options = cli
        .commands
        .iter()
        .fold(RewriteOptions::default(), |options, name| {
            options.with_command(name)
        });

    let outcome = if cli.check {
        run_check(&cli, &options)
    } else {
        run_fix(&cli, options)
    };

    match outcome {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Print diagnostics; exit code 1 if any heading would change
#[cfg(feature = "cli")]
fn run_check(cli: &Cli, options: &RewriteOptions) -> FixResult<i32> {
    let text = read_source(&cli.input)?;
    let store = MappingStore::load(&cli.mappings)?;
    let result = check_headings(&text, &store, options);

    if cli.json {
        println!("{}", diagnostics_to_json(&result).map_err(FixError::Report)?);
    } else if !cli.quiet || result.pending_rewrites() > 0 {
        println!("{}", format_diagnostics(&result, !cli.no_color));
    }

    Ok(if result.pending_rewrites() > 0 { 1 } else { 0 })
}

#[cfg(feature = "cli")]
fn run_fix(cli: &Cli, options: RewriteOptions) -> FixResult<i32> {
    let mut job = DocumentJob::new(&cli.input)
        .with_mappings(&cli.mappings)
        .with_options(options)
        .dry_run(cli.dry_run);
    if let Some(ref output) = cli.output {
        job = job.with_output(output);
    }

    let mut resolver = resolver_for(cli);
    let report = job.run(resolver.as_mut())?;

    if !cli.quiet {
        for change in &report.rewrite.changes {
            eprintln!("{}", change);
        }
        match report.written {
            Some(ref path) => eprintln!("✓ Output written to: {}", path.display()),
            None if cli.dry_run => eprintln!(
                "Dry run: {} heading line(s) would change",
                report.rewrite.changes.len()
            ),
            None => eprintln!("No section headings needed changes"),
        }
        if report.mappings_saved {
            eprintln!("✓ Mappings saved to: {}", job.mappings_path().display());
        }
    }

    Ok(0)
}

/// `--strict` refuses, `--yes` renders silently, otherwise ask on the terminal
#[cfg(feature = "cli")]
fn resolver_for(cli: &Cli) -> Box<dyn FormulaResolver> {
    if cli.strict {
        Box::new(StrictResolver)
    } else if cli.yes {
        Box::new(FallbackResolver::new())
    } else {
        Box::new(TerminalPrompt::stdio())
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  cargo install texorpdf --features cli");
    eprintln!("  texorpdf [OPTIONS] <INPUT>");
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use texorpdf::{Resolution, ResolveError};

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("texorpdf").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_yes_help_mentions_unknown_formulas() {
        let help = Cli::command().render_help().to_string();
        assert!(help.contains("Never ask, including for unknown formulas"));
    }

    #[test]
    fn test_yes_never_prompts_for_unknown_formula() {
        let cli = parse(&["paper.tex", "-y"]);
        let mut resolver = resolver_for(&cli);
        let got = resolver.resolve("x_{n+1}", &MappingStore::new()).unwrap();
        assert_eq!(got, Resolution::Once("xₙ₊₁".to_string()));
    }

    #[test]
    fn test_strict_refuses() {
        let cli = parse(&["paper.tex", "--strict"]);
        let err = resolver_for(&cli)
            .resolve("\\foo", &MappingStore::new())
            .unwrap_err();
        assert!(matches!(err, ResolveError::Rejected { .. }));
    }

    #[test]
    fn test_yes_conflicts_with_strict() {
        assert!(Cli::try_parse_from(["texorpdf", "a.tex", "-y", "--strict"]).is_err());
    }

    #[test]
    fn test_json_requires_check() {
        assert!(Cli::try_parse_from(["texorpdf", "a.tex", "--json"]).is_err());
        assert!(parse(&["a.tex", "--check", "--json"]).json);
    }
}
