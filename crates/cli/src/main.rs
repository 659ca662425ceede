//! protogo CLI
//!
//! Converts a `.proto` file into a plain Go file with structs, enums and
//! interfaces, for REST API migrations that drop the gRPC dependency.

mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use protogo_common::{GeneratorError, ScanSummary};
use protogo_generator::{format_or_original, GoGenerator, Gofmt, DEFAULT_FORMAT_TIMEOUT};
use protogo_parser::ProtoParser;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "protogo")]
#[command(
    version,
    about = "Convert a .proto file to a pure Go file with structs, enums and interfaces",
    long_about = "Convert a .proto file to a pure Go file with structs, enums and interfaces.\n\n\
                  Designed for REST API migrations, avoiding gRPC dependencies."
)]
#[command(after_help = "EXAMPLES:\n  \
    # Print Go code for user.proto\n  \
    protogo user.proto\n\n  \
    # Write a formatted file in package api\n  \
    protogo user.proto --package api --format --output api/user.go")]
struct Cli {
    /// Path to the .proto schema
    input: PathBuf,

    /// Go package name for the generated file
    #[arg(short, long, default_value = "models")]
    package: String,

    /// Output file path (prints to stdout if not provided)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Run gofmt on the generated code
    #[arg(short, long)]
    format: bool,

    /// gofmt executable to run
    #[arg(long, default_value = "gofmt")]
    gofmt: PathBuf,

    /// Pass -s (simplify) to gofmt
    #[arg(long, requires = "format")]
    simplify: bool,

    /// Seconds to wait for gofmt before giving up
    #[arg(long, default_value_t = DEFAULT_FORMAT_TIMEOUT.as_secs())]
    format_timeout: u64,

    /// Path to the JSON log file (empty to disable)
    #[arg(long, default_value = "converter.log")]
    log_file: String,
}

/// Settings for one conversion run
#[derive(Debug)]
struct ConvertConfig {
    input: PathBuf,
    package: String,
    output: Option<PathBuf>,
    formatter: Option<Gofmt>,
}

impl From<Cli> for ConvertConfig {
    fn from(cli: Cli) -> Self {
        let formatter = cli.format.then(|| {
            let args = if cli.simplify { vec!["-s"] } else { vec![] };
            Gofmt::new()
                .with_program(cli.gofmt)
                .with_args(args)
                .with_timeout(Duration::from_secs(cli.format_timeout))
        });

        Self {
            input: cli.input,
            package: cli.package,
            output: cli.output,
            formatter,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_file = (!cli.log_file.is_empty()).then(|| PathBuf::from(&cli.log_file));
    if let Err(e) = logging::init(cli.verbose, log_file.as_deref()) {
        eprintln!("{} {:#}", "✗".red().bold(), e);
        return ExitCode::FAILURE;
    }

    match run(&ConvertConfig::from(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<GeneratorError>() {
                Some(GeneratorError::InputNotFound(path)) => {
                    error!("Input file not found: {}", path.display());
                }
                _ => error!("An unexpected error occurred during conversion: {err:?}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(config: &ConvertConfig) -> Result<()> {
    let parser = ProtoParser::from_file(&config.input, &config.package)
        .with_context(|| format!("Failed to load {}", config.input.display()))?;
    let file = parser.parse();

    let generator = GoGenerator::new().context("Failed to create generator")?;
    let mut code = generator
        .render(&file)
        .context("Failed to assemble Go source")?;

    if let Some(formatter) = &config.formatter {
        code = format_or_original(formatter, code);
    }

    match &config.output {
        Some(path) => write_output(path, &code)?,
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{code}").context("Failed to write to stdout")?;
            stdout.flush().context("Failed to flush stdout")?;
            info!("Output sent to stdout");
        }
    }

    print_summary(&file.summary);
    Ok(())
}

fn write_output(path: &Path, code: &str) -> Result<()> {
    fs::write(path, code).with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Successfully wrote generated code to: {}", path.display());
    Ok(())
}

fn print_summary(summary: &ScanSummary) {
    eprintln!(
        "{} {} messages, {} enums, {} services ({} fields, {} rpcs)",
        "✓".green().bold(),
        summary.messages.to_string().yellow(),
        summary.enums.to_string().yellow(),
        summary.services.to_string().yellow(),
        summary.fields,
        summary.rpcs
    );
}
