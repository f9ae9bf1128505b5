//! Command-line front end for css-directives.
//!
//! Reads a document, applies every `css:` directive in it, and writes the
//! result:
//!
//! ```text
//! css-directives -d theme.yaml -o page.out.html page.html
//! ```
//!
//! The binary is a thin wrapper over [`command`], [`Options::from_matches`]
//! and [`run`], which are exposed here so they can be tested without
//! spawning a process.

pub mod report;

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use css_directives::{
    parse_document, serialize_document, DirectiveRegistry, DirectiveSheet, Orchestrator,
    PassReport,
};

use crate::report::ReportFormat;

/// Input path that stands for standard input.
pub const STDIN: &str = "-";

/// Builds the command definition.
pub fn command() -> Command {
    Command::new("css-directives")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Turn css: attributes into inline styles")
        .arg(
            Arg::new("input")
                .value_name("INPUT")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf))
                .help("Document to process, or - for standard input"),
        )
        .arg(
            Arg::new("directives")
                .short('d')
                .long("directives")
                .value_name("FILE")
                .action(ArgAction::Append)
                .value_parser(clap::value_parser!(PathBuf))
                .help("Directive sheet (YAML or JSON); may be repeated"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Write the result here instead of standard output"),
        )
        .arg(
            Arg::new("report")
                .long("report")
                .value_name("FORMAT")
                .value_parser(clap::value_parser!(ReportFormat))
                .help("Print a summary of each pass to standard error"),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .action(ArgAction::SetTrue)
                .help("Fail when a directive name is not registered"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Log more (-v info, -vv debug, -vvv trace)"),
        )
}

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub input: PathBuf,
    pub directives: Vec<PathBuf>,
    pub output: Option<PathBuf>,
    pub report: Option<ReportFormat>,
    pub strict: bool,
    pub verbosity: u8,
}

impl Options {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            input: matches.get_one::<PathBuf>("input").cloned().unwrap_or_default(),
            directives: matches
                .get_many::<PathBuf>("directives")
                .map(|paths| paths.cloned().collect())
                .unwrap_or_default(),
            output: matches.get_one::<PathBuf>("output").cloned(),
            report: matches.get_one::<ReportFormat>("report").copied(),
            strict: matches.get_flag("strict"),
            verbosity: matches.get_count("verbose"),
        }
    }

    /// Log level for the verbosity count.
    pub fn log_level(&self) -> tracing::Level {
        match self.verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}

/// A processed document and what the passes did to it.
#[derive(Debug, Clone)]
pub struct Processed {
    pub html: String,
    pub reports: Vec<PassReport>,
}

impl Processed {
    /// Total number of unresolved directive names over all passes.
    pub fn unresolved(&self) -> usize {
        self.reports.iter().map(|r| r.unresolved.len()).sum()
    }
}

/// Loads the sheets, reads the input, and runs one directive pass over it.
pub fn process(options: &Options) -> Result<Processed> {
    let mut registry = DirectiveRegistry::new();
    for path in &options.directives {
        let sheet = DirectiveSheet::from_path(path)
            .with_context(|| format!("failed to load directive sheet {}", path.display()))?;
        sheet
            .install(&mut registry)
            .with_context(|| format!("failed to install directive sheet {}", path.display()))?;
    }
    tracing::info!(directives = registry.len(), "directives loaded");

    let source = read_input(&options.input)?;
    let mut doc = parse_document(&source)
        .with_context(|| format!("failed to parse {}", options.input.display()))?;

    let mut orchestrator = Orchestrator::new();
    orchestrator.init();
    let reports = orchestrator.document_ready(&mut doc, &registry);

    Ok(Processed {
        html: serialize_document(&doc),
        reports,
    })
}

/// Runs the tool: process, write the output, print the report.
///
/// In strict mode the output is still written before unresolved names are
/// reported as an error.
pub fn run(options: &Options) -> Result<()> {
    let processed = process(options)?;

    match &options.output {
        Some(path) => fs::write(path, &processed.html)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => io::stdout()
            .write_all(processed.html.as_bytes())
            .context("failed to write to standard output")?,
    }

    if let Some(format) = options.report {
        let rendered = report::render(&processed.reports, format)?;
        eprintln!("{rendered}");
    }

    let unresolved = processed.unresolved();
    if options.strict && unresolved > 0 {
        bail!("{unresolved} directive name(s) did not resolve");
    }
    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == STDIN {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .context("failed to read standard input")?;
        return Ok(source);
    }
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
