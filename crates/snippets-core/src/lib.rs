pub mod config;
pub mod error;
pub mod types;

pub use config::SnippetsConfig;
pub use error::{Result, SnippetsError};
pub use types::Snippet;
