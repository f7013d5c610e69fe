use thiserror::Error;

/// Top-level error type for the snippets tool.
///
/// Storage errors carry the rendered driver message so that this crate does
/// not depend on the database driver; `snippets-storage` maps
/// `rusqlite::Error` into the matching variant.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SnippetsError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Snippet '{keyword}' already exists")]
    DuplicateKeyword { keyword: String },

    #[error("Invalid keyword: {0}")]
    InvalidKeyword(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for SnippetsError {
    fn from(err: toml::de::Error) -> Self {
        SnippetsError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for SnippetsError {
    fn from(err: serde_json::Error) -> Self {
        SnippetsError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for snippet operations.
pub type Result<T> = std::result::Result<T, SnippetsError>;
