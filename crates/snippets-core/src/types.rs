use serde::{Deserialize, Serialize};

/// A named unit of stored text.
///
/// `keyword` is the unique identifier; `message` is the snippet body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    pub keyword: String,
    pub message: String,
}

impl Snippet {
    pub fn new(keyword: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            message: message.into(),
        }
    }
}
