//! CLI argument definitions for the snippets tool.
//!
//! Uses `clap` with derive macros. Each subcommand owns a parameter struct
//! that the dispatcher hands to the repository.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::output::OutputFormat;

/// Store and retrieve snippets of text.
#[derive(Parser, Debug)]
#[command(name = "snippets", version, about)]
pub struct CliArgs {
    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level", global = true)]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Store a snippet
    Put(PutArgs),
    /// Retrieve a snippet
    Get(GetArgs),
    /// Retrieve keywords
    Catalog,
    /// Wildcard search
    Search(SearchArgs),
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct PutArgs {
    /// Name of the snippet
    pub name: String,
    /// Snippet text
    pub snippet: String,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct GetArgs {
    /// Name of the snippet
    pub name: String,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct SearchArgs {
    /// Search word, `%` matches any run of characters
    pub search_string: String,
}

impl CliArgs {
    /// Resolve the log filter directive.
    ///
    /// Priority: --log-level flag > RUST_LOG value (`env_level`) > config file value.
    pub fn resolve_log_level(&self, env_level: Option<String>, config_level: &str) -> String {
        if let Some(ref level) = self.log_level {
            return level.clone();
        }
        if let Some(level) = env_level {
            if !level.trim().is_empty() {
                return level;
            }
        }
        config_level.to_string()
    }
}

/// Resolve the configuration file path.
///
/// Priority: SNIPPETS_CONFIG env var > ~/.snippets/config.toml > ./config.toml.
pub fn resolve_config_path() -> PathBuf {
    if let Ok(p) = std::env::var("SNIPPETS_CONFIG") {
        return PathBuf::from(p);
    }
    match snippets_core::config::home_dir() {
        Some(home) => home.join(".snippets").join("config.toml"),
        None => PathBuf::from("config.toml"),
    }
}
