//! Snippet repository backed by SQLite.
//!
//! Every operation runs inside its own transaction via
//! [`Database::with_transaction`], so statements are released and the
//! transaction is committed or rolled back before the call returns.

use std::sync::Arc;

use rusqlite::OptionalExtension;
use tracing::{debug, info};

use snippets_core::error::SnippetsError;
use snippets_core::types::Snippet;

use crate::db::Database;

/// Repository for named text snippets.
pub struct SnippetRepository {
    db: Arc<Database>,
}

impl SnippetRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Store a snippet under `name`.
    ///
    /// `name` is stored verbatim, surrounding whitespace included; only the
    /// empty string is rejected. Fails with [`SnippetsError::DuplicateKeyword`]
    /// if `name` is taken; the existing message is left untouched.
    pub fn store(&self, name: &str, message: &str) -> Result<Snippet, SnippetsError> {
        if name.is_empty() {
            return Err(SnippetsError::InvalidKeyword(
                "keyword must not be empty".to_string(),
            ));
        }

        info!("Storing snippet {:?}: {:?}", name, message);
        self.db.with_transaction(|tx| {
            tx.execute(
                "INSERT INTO snippets (keyword, message) VALUES (?1, ?2)",
                rusqlite::params![name, message],
            )
            .map_err(|e| map_insert_err(name, e))?;
            Ok(())
        })?;
        debug!("Snippet stored successfully");

        Ok(Snippet::new(name, message))
    }

    /// Retrieve the message stored under `name`, or `None` if absent.
    pub fn get(&self, name: &str) -> Result<Option<String>, SnippetsError> {
        info!("Retrieve snippet {:?}", name);
        let message = self.db.with_transaction(|tx| {
            tx.query_row(
                "SELECT message FROM snippets WHERE keyword = ?1",
                rusqlite::params![name],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .map_err(|e| SnippetsError::Storage(format!("Failed to fetch snippet: {}", e)))
        })?;

        match &message {
            Some(_) => debug!("Snippet {:?} found", name),
            None => debug!("No snippet was found with name {:?}", name),
        }
        Ok(message)
    }

    /// All distinct keywords in ascending order.
    pub fn catalog(&self) -> Result<Vec<String>, SnippetsError> {
        info!("Select keyword list");
        let keywords = self.db.with_transaction(|tx| {
            let mut stmt = tx
                .prepare("SELECT DISTINCT keyword FROM snippets ORDER BY keyword")
                .map_err(|e| SnippetsError::Storage(e.to_string()))?;

            let keywords = stmt
                .query_map([], |row| row.get::<_, String>(0))
                .map_err(|e| SnippetsError::Storage(format!("Failed to list keywords: {}", e)))?
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| SnippetsError::Storage(e.to_string()))?;
            Ok(keywords)
        })?;

        debug!(count = keywords.len(), "Keyword list retrieved");
        Ok(keywords)
    }

    /// Snippets whose keyword matches a SQL `LIKE` pattern.
    ///
    /// `%` matches any run of characters and `_` matches exactly one.
    /// Matching is case-sensitive.
    pub fn search(&self, pattern: &str) -> Result<Vec<Snippet>, SnippetsError> {
        info!("Search snippet database for {:?}", pattern);
        let snippets = self.db.with_transaction(|tx| {
            let mut stmt = tx
                .prepare(
                    "SELECT keyword, message FROM snippets
                     WHERE keyword LIKE ?1
                     ORDER BY keyword",
                )
                .map_err(|e| SnippetsError::Storage(e.to_string()))?;

            let snippets = stmt
                .query_map(rusqlite::params![pattern], |row| {
                    Ok(Snippet {
                        keyword: row.get(0)?,
                        message: row.get(1)?,
                    })
                })
                .map_err(|e| SnippetsError::Storage(format!("Failed to search snippets: {}", e)))?
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| SnippetsError::Storage(e.to_string()))?;
            Ok(snippets)
        })?;

        debug!(count = snippets.len(), "Search completed");
        Ok(snippets)
    }
}

/// Map an insert failure, turning a primary-key clash into `DuplicateKeyword`.
fn map_insert_err(keyword: &str, e: rusqlite::Error) -> SnippetsError {
    match e {
        rusqlite::Error::SqliteFailure(err, _)
            if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY =>
        {
            SnippetsError::DuplicateKeyword {
                keyword: keyword.to_string(),
            }
        }
        other => SnippetsError::Storage(format!("Failed to store snippet: {}", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_repo() -> SnippetRepository {
        SnippetRepository::new(Arc::new(Database::in_memory().unwrap()))
    }

    #[test]
    fn test_store_returns_pair() {
        let repo = make_repo();
        let stored = repo.store("greet", "hello world").unwrap();
        assert_eq!(stored, Snippet::new("greet", "hello world"));
    }

    #[test]
    fn test_store_then_get_round_trip() {
        let repo = make_repo();
        let cases = [
            ("greet", "hello world"),
            ("multi", "line one\nline two"),
            ("quotes", "it's \"quoted\""),
            ("unicode", "héllo wörld ✓"),
            ("empty-body", ""),
        ];

        for (name, message) in cases {
            repo.store(name, message).unwrap();
            assert_eq!(repo.get(name).unwrap().as_deref(), Some(message));
        }
    }

    #[test]
    fn test_get_missing_returns_none() {
        let repo = make_repo();
        assert_eq!(repo.get("missing").unwrap(), None);
    }

    #[test]
    fn test_get_is_exact_match() {
        let repo = make_repo();
        repo.store("apple", "fruit").unwrap();
        assert_eq!(repo.get("app%").unwrap(), None);
        assert_eq!(repo.get("Apple").unwrap(), None);
    }

    #[test]
    fn test_store_rejects_empty_keyword() {
        let repo = make_repo();
        let err = repo.store("", "body").unwrap_err();
        assert!(matches!(err, SnippetsError::InvalidKeyword(_)));

        assert!(repo.catalog().unwrap().is_empty());
    }

    #[test]
    fn test_store_keeps_keyword_verbatim() {
        let repo = make_repo();
        repo.store(" a ", "padded").unwrap();
        repo.store("   ", "blank").unwrap();
        repo.store("a", "plain").unwrap();

        assert_eq!(repo.catalog().unwrap(), vec!["   ", " a ", "a"]);
        assert_eq!(repo.get(" a ").unwrap().as_deref(), Some("padded"));
        assert_eq!(repo.get("a").unwrap().as_deref(), Some("plain"));
        assert_eq!(repo.get("   ").unwrap().as_deref(), Some("blank"));
    }

    #[test]
    fn test_duplicate_keyword_fails_and_keeps_original() {
        let repo = make_repo();
        repo.store("dup", "first").unwrap();

        let err = repo.store("dup", "second").unwrap_err();
        match err {
            SnippetsError::DuplicateKeyword { keyword } => assert_eq!(keyword, "dup"),
            other => panic!("Expected DuplicateKeyword, got {:?}", other),
        }

        assert_eq!(repo.get("dup").unwrap().as_deref(), Some("first"));
        assert_eq!(repo.catalog().unwrap(), vec!["dup"]);
    }

    #[test]
    fn test_catalog_empty() {
        let repo = make_repo();
        assert!(repo.catalog().unwrap().is_empty());
    }

    #[test]
    fn test_catalog_sorted() {
        let repo = make_repo();
        repo.store("b", "two").unwrap();
        repo.store("a", "one").unwrap();
        repo.store("c", "three").unwrap();

        assert_eq!(repo.catalog().unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_search_prefix() {
        let repo = make_repo();
        repo.store("apple", "fruit").unwrap();
        repo.store("banana", "fruit").unwrap();

        let results = repo.search("a%").unwrap();
        assert_eq!(results, vec![Snippet::new("apple", "fruit")]);
    }

    #[test]
    fn test_search_substring_and_single_char() {
        let repo = make_repo();
        repo.store("apple", "fruit").unwrap();
        repo.store("grape", "fruit").unwrap();
        repo.store("carrot", "vegetable").unwrap();

        let mut keywords: Vec<String> = repo
            .search("%ap%")
            .unwrap()
            .into_iter()
            .map(|s| s.keyword)
            .collect();
        keywords.sort();
        assert_eq!(keywords, vec!["apple", "grape"]);

        let results = repo.search("_rape").unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].keyword, "grape");
    }

    #[test]
    fn test_search_is_case_sensitive() {
        let repo = make_repo();
        repo.store("Apple", "upper").unwrap();
        repo.store("apple", "lower").unwrap();

        let results = repo.search("a%").unwrap();
        assert_eq!(results, vec![Snippet::new("apple", "lower")]);
    }

    #[test]
    fn test_search_no_match() {
        let repo = make_repo();
        repo.store("apple", "fruit").unwrap();
        assert!(repo.search("z%").unwrap().is_empty());
    }

    #[test]
    fn test_repository_reads_through_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snippets.db");

        let first = SnippetRepository::new(Arc::new(Database::new(&path).unwrap()));
        first.store("persisted", "still here").unwrap();
        drop(first);

        let second = SnippetRepository::new(Arc::new(Database::new(&path).unwrap()));
        assert_eq!(
            second.get("persisted").unwrap().as_deref(),
            Some("still here")
        );
    }
}
