//! Snippets storage crate - SQLite connection, migrations, repository.
//!
//! Provides a single-connection SQLite database with migrations and the
//! snippet repository that runs each operation in its own transaction.

pub mod db;
pub mod migrations;
pub mod repository;

pub use db::Database;
pub use repository::SnippetRepository;
