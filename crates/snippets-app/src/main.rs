//! Snippets binary - composition root.
//!
//! 1. Parse the command line (usage errors exit here, before any I/O)
//! 2. Load configuration from TOML
//! 3. Route tracing output to the log file
//! 4. Open the SQLite database
//! 5. Dispatch the command and print its result

use std::path::Path;
use std::process::ExitCode;
use std::sync::{Arc, Mutex};

use clap::Parser;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

use snippets_core::{Result, SnippetsConfig};
use snippets_storage::{Database, SnippetRepository};

mod cli;
mod dispatch;
mod output;

use cli::CliArgs;

/// Load the config file if present; a missing file means defaults.
fn load_config(path: &Path) -> Result<SnippetsConfig> {
    if path.exists() {
        SnippetsConfig::load(path)
    } else {
        Ok(SnippetsConfig::default())
    }
}

/// Parse a filter directive, falling back to `info` when it is invalid.
fn log_filter(directive: &str) -> EnvFilter {
    EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber, appending to `log_path`.
///
/// Falls back to stderr if the log file cannot be opened.
fn init_tracing(filter: &str, log_path: &Path) {
    let env_filter = log_filter(filter);

    let opened = log_path
        .parent()
        .map_or(Ok(()), std::fs::create_dir_all)
        .and_then(|_| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_path)
        });

    let writer = match opened {
        Ok(file) => BoxMakeWriter::new(Mutex::new(file)),
        Err(e) => {
            eprintln!(
                "Warning: cannot open log file {}: {}. Logging to stderr.",
                log_path.display(),
                e
            );
            BoxMakeWriter::new(std::io::stderr)
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();
}

fn run(args: CliArgs) -> Result<()> {
    let config_file = cli::resolve_config_path();
    let config = load_config(&config_file)?;

    init_tracing(
        &args.resolve_log_level(std::env::var("RUST_LOG").ok(), &config.general.log_level),
        &config.log_path(),
    );
    tracing::info!("Starting snippets v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = %config_file.display(), "Configuration loaded");

    let db_path = config.database_path();
    let db = Database::new(&db_path)?;
    let repo = SnippetRepository::new(Arc::new(db));

    let output = dispatch::dispatch(&repo, args.command)?;
    println!("{}", output.render(args.format)?);
    Ok(())
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
