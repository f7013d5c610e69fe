//! Rendering of command results for stdout.

use clap::ValueEnum;
use serde::Serialize;

use snippets_core::{Result, Snippet};

/// Text shown when `get` finds no snippet.
pub const NOT_FOUND_MESSAGE: &str = "404: Snippet Not Found";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Result of one dispatched command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum CommandOutput {
    Put {
        snippet: Snippet,
    },
    Get {
        keyword: String,
        message: Option<String>,
    },
    Catalog {
        keywords: Vec<String>,
    },
    Search {
        pattern: String,
        results: Vec<Snippet>,
    },
}

impl CommandOutput {
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(self.render_text()),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
        }
    }

    fn render_text(&self) -> String {
        match self {
            CommandOutput::Put { snippet } => format!(
                "Stored {} as {}",
                quoted(&snippet.message),
                quoted(&snippet.keyword)
            ),
            CommandOutput::Get {
                message: Some(message),
                ..
            } => format!("Retrieved snippet: {}", quoted(message)),
            CommandOutput::Get { message: None, .. } => NOT_FOUND_MESSAGE.to_string(),
            CommandOutput::Catalog { keywords } if keywords.is_empty() => {
                "No keywords stored".to_string()
            }
            CommandOutput::Catalog { keywords } => {
                let mut out = String::from("Retrieved keywords:");
                for keyword in keywords {
                    out.push_str("\n  ");
                    out.push_str(keyword);
                }
                out
            }
            CommandOutput::Search { pattern, results } if results.is_empty() => {
                format!("No snippets match {}", quoted(pattern))
            }
            CommandOutput::Search { pattern, results } => {
                let mut out = format!("Search results for {}:", quoted(pattern));
                for snippet in results {
                    out.push_str(&format!(
                        "\n  {}: {}",
                        quoted(&snippet.keyword),
                        quoted(&snippet.message)
                    ));
                }
                out
            }
        }
    }
}

/// Quote `text` for display.
///
/// Single quotes are used unless the text contains a single quote and no
/// double quote. The chosen quote, backslashes and control characters
/// are escaped, so the quoted text is never ambiguous.
fn quoted(text: &str) -> String {
    let quote = if text.contains('\'') && !text.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(text.len() + 2);
    out.push(quote);
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}
