//! sqlcheck CLI
//!
//! Parses one SQL statement and prints its canonical form.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::{debug, error, warn, Level};
use tracing_subscriber::FmtSubscriber;

use psql_parse::parser::DEFAULT_MAX_DEPTH;
use psql_parse::visit::validate;
use psql_parse::{Driver, ParserOptions, Statement};

/// Parse one SQL statement and print its canonical form.
#[derive(Parser)]
#[command(name = "sqlcheck")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// File holding the statement (standard input if not specified).
    input: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Sql)]
    format: Format,

    /// Deepest tree the parser may build.
    #[arg(long, env = "SQLCHECK_MAX_DEPTH", default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Skip the post-parse checks.
    #[arg(long)]
    no_validate: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Canonical SQL.
    Sql,
    /// The syntax tree as JSON.
    Json,
    /// The syntax tree in Rust debug notation.
    Debug,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .finish();
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let text = read_input(cli.input.as_ref())?;

    let options = ParserOptions::default().with_max_depth(cli.max_depth);
    let mut driver = Driver::with_options(options);
    let statement = match driver.parse(&text) {
        Ok(statement) => statement,
        Err(err) => {
            error!("{err}");
            return Ok(ExitCode::FAILURE);
        }
    };

    if cli.no_validate {
        debug!("validation skipped");
    } else {
        for violation in validate(&statement) {
            warn!("{violation}");
        }
    }

    println!("{}", render(&statement, cli.format)?);
    Ok(ExitCode::SUCCESS)
}

fn read_input(path: Option<&PathBuf>) -> anyhow::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("failed to read standard input")?;
            Ok(text)
        }
    }
}

fn render(statement: &Statement, format: Format) -> anyhow::Result<String> {
    Ok(match format {
        Format::Sql => statement.to_string(),
        Format::Json => serde_json::to_string_pretty(statement)?,
        Format::Debug => format!("{statement:#?}"),
    })
}
