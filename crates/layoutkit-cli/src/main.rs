use std::collections::HashMap;
use std::fmt::Write as _;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use layoutkit_codegen::{safelist, CompileOutput, SafelistFormat};
use layoutkit_rules::{Component, LintWarning, Severity, UnknownComponent};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "LAYOUTKIT_LOG";

#[derive(Parser)]
#[command(name = "layoutkit")]
#[command(about = "LayoutKit: semantic layout components compiled to utility classes")]
#[command(version)]
struct Cli {
    /// Log every resolved tag to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile HTML files, replacing layout components with plain containers.
    /// Other files are passed through unchanged.
    Build {
        /// Input files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output directory (prints to stdout when omitted)
        #[arg(short = 'o', long = "out-dir")]
        out_dir: Option<PathBuf>,
    },

    /// Lint files without generating output
    Check {
        /// Input files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Fail on suggestions as well as warnings
        #[arg(long)]
        strict: bool,

        /// Print warnings as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the classes every component in a file resolves to
    Results {
        /// Input file
        file: PathBuf,

        /// Print results and warnings as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print every class the compiler can emit
    Safelist {
        #[arg(long, value_enum, default_value_t = Format::Plain)]
        format: Format,
    },

    /// Show the classes and props of one component
    Describe {
        /// Component name, e.g. Stack
        tag: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Plain,
    Json,
    Css,
}

impl From<Format> for SafelistFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Plain => SafelistFormat::Plain,
            Format::Json => SafelistFormat::Json,
            Format::Css => SafelistFormat::Css,
        }
    }
}

/// CLI error.
#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error(
        "{} and {} would both be written to {}",
        .first.display(),
        .second.display(),
        .target.display()
    )]
    OutputCollision {
        first: PathBuf,
        second: PathBuf,
        target: PathBuf,
    },

    #[error(transparent)]
    UnknownComponent(#[from] UnknownComponent),

    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("lint failed: {count} problem(s) found")]
    LintFailed { count: usize },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::Build { files, out_dir } => cmd_build(&files, out_dir.as_deref()),
        Command::Check {
            files,
            strict,
            json,
        } => cmd_check(&files, strict, json),
        Command::Results { file, json } => cmd_results(&file, json),
        Command::Safelist { format } => {
            print!("{}", safelist::render(format.into())?);
            Ok(())
        }
        Command::Describe { tag } => cmd_describe(&tag),
    }
}

fn read_source(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn write_output(path: &Path, contents: &str) -> Result<(), CliError> {
    let write = || -> io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)
    };
    write().map_err(|source| CliError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Where `build` writes the compiled form of `input`.
fn output_path(input: &Path, out_dir: &Path) -> PathBuf {
    out_dir.join(input.file_name().unwrap_or(input.as_os_str()))
}

/// Targets under `out_dir`, one per input. Inputs that share a file name
/// are rejected before anything is written.
fn output_paths(files: &[PathBuf], out_dir: &Path) -> Result<Vec<PathBuf>, CliError> {
    let mut seen: HashMap<PathBuf, &PathBuf> = HashMap::new();
    files
        .iter()
        .map(|input| {
            let target = output_path(input, out_dir);
            if let Some(first) = seen.insert(target.clone(), input) {
                return Err(CliError::OutputCollision {
                    first: first.clone(),
                    second: input.clone(),
                    target,
                });
            }
            Ok(target)
        })
        .collect()
}

fn build_file(path: &Path) -> Result<String, CliError> {
    let source = read_source(path)?;
    Ok(layoutkit_codegen::transform_file(
        &source,
        &path.to_string_lossy(),
    ))
}

fn cmd_build(files: &[PathBuf], out_dir: Option<&Path>) -> Result<(), CliError> {
    let Some(dir) = out_dir else {
        for path in files {
            let html = build_file(path)?;
            info!(input = %path.display(), "built");
            print!("{html}");
        }
        return Ok(());
    };

    let targets = output_paths(files, dir)?;
    for (path, target) in files.iter().zip(&targets) {
        let html = build_file(path)?;
        write_output(target, &html)?;
        info!(input = %path.display(), output = %target.display(), "built");
        eprintln!("Built: {}", target.display());
    }
    Ok(())
}

#[derive(Serialize)]
struct FileReport<'a> {
    file: String,
    warnings: &'a [LintWarning],
}

/// Warnings that make `check` fail.
fn failing(warnings: &[LintWarning], strict: bool) -> usize {
    warnings
        .iter()
        .filter(|w| strict || w.severity == Severity::Warning)
        .count()
}

fn format_warnings(file: &str, warnings: &[LintWarning]) -> String {
    let mut out = String::new();
    for w in warnings {
        let _ = write!(out, "{file}:{}: {} [{}] {}", w.line, w.severity, w.rule, w.message);
        if let Some(fix) = &w.fix {
            let _ = write!(out, "\n  fix: {fix}");
        }
        out.push('\n');
    }
    out
}

fn cmd_check(files: &[PathBuf], strict: bool, json: bool) -> Result<(), CliError> {
    let mut outputs = Vec::with_capacity(files.len());
    for path in files {
        let source = read_source(path)?;
        let output = layoutkit_codegen::compile_to_results(&source);
        info!(
            file = %path.display(),
            components = output.results.len(),
            warnings = output.warnings.len(),
            "checked"
        );
        outputs.push((path.display().to_string(), output));
    }

    if json {
        let reports: Vec<FileReport<'_>> = outputs
            .iter()
            .map(|(file, output)| FileReport {
                file: file.clone(),
                warnings: &output.warnings,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for (file, output) in &outputs {
            if output.is_clean() {
                eprintln!("OK: {file}");
            } else {
                print!("{}", format_warnings(file, &output.warnings));
            }
        }
    }

    let count: usize = outputs
        .iter()
        .map(|(_, output)| failing(&output.warnings, strict))
        .sum();
    if count > 0 {
        return Err(CliError::LintFailed { count });
    }
    Ok(())
}

fn format_results(output: &CompileOutput) -> String {
    let mut out = String::new();
    for result in &output.results {
        let props = result.props.to_string();
        let _ = writeln!(out, "<{}{props}>", result.component);
        let _ = writeln!(out, "  {}", result.html);
    }
    out
}

fn cmd_results(file: &Path, json: bool) -> Result<(), CliError> {
    let source = read_source(file)?;
    let output = layoutkit_codegen::compile_to_results(&source);
    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", format_results(&output));
        print!("{}", format_warnings(&file.display().to_string(), &output.warnings));
    }
    Ok(())
}

fn cmd_describe(tag: &str) -> Result<(), CliError> {
    let component: Component = tag.parse()?;
    if let Some(doc) = layoutkit_codegen::describe(component.name()) {
        print!("{}", doc.to_markdown());
    }
    Ok(())
}
