//! Query value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// A clinical question posed by the user (Value Object)
///
/// Construction trims surrounding whitespace and rejects blank input, so a
/// `Query` in hand is always safe to send to the retrieval collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    content: String,
}

impl Query {
    /// Try to create a new query, failing with [`DomainError::EmptyQuery`]
    /// when the input is blank after trimming.
    pub fn try_new(content: impl AsRef<str>) -> Result<Self, DomainError> {
        let trimmed = content.as_ref().trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyQuery);
        }
        Ok(Self {
            content: trimmed.to_string(),
        })
    }

    /// Get the query content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl TryFrom<&str> for Query {
    type Error = DomainError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Query::try_new(s)
    }
}

impl TryFrom<String> for Query {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Query::try_new(s)
    }
}
