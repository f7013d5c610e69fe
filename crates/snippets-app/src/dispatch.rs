//! Maps a parsed subcommand onto the matching repository operation.

use snippets_core::Result;
use snippets_storage::SnippetRepository;

use crate::cli::{Command, GetArgs, PutArgs, SearchArgs};
use crate::output::CommandOutput;

/// Run a single command against the repository.
pub fn dispatch(repo: &SnippetRepository, command: Command) -> Result<CommandOutput> {
    tracing::debug!(command = ?command, "Dispatching command");

    let output = match command {
        Command::Put(PutArgs { name, snippet }) => CommandOutput::Put {
            snippet: repo.store(&name, &snippet)?,
        },
        Command::Get(GetArgs { name }) => {
            let message = repo.get(&name)?;
            CommandOutput::Get {
                keyword: name,
                message,
            }
        }
        Command::Catalog => CommandOutput::Catalog {
            keywords: repo.catalog()?,
        },
        Command::Search(SearchArgs { search_string }) => {
            let results = repo.search(&search_string)?;
            CommandOutput::Search {
                pattern: search_string,
                results,
            }
        }
    };

    Ok(output)
}
