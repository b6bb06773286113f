//! Completion shapes returned by text-generation collaborators.
//!
//! Chat endpoints answer with a message object, text2text models with a
//! list of candidates, and simple backends with plain text. Every caller
//! converts to plain text exactly once via [`Completion::into_text`],
//! immediately after the collaborator returns.

use super::entities::Role;
use crate::core::error::DomainError;

/// Raw return value of a text-generation collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Plain text
    Text(String),
    /// Chat-completion message object
    Message { role: Role, content: String },
    /// Generation candidates, best first
    Candidates(Vec<String>),
}

impl Completion {
    pub fn text(text: impl Into<String>) -> Self {
        Completion::Text(text.into())
    }

    pub fn message(content: impl Into<String>) -> Self {
        Completion::Message {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    pub fn candidates<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Completion::Candidates(candidates.into_iter().map(Into::into).collect())
    }

    /// Flatten into the textual payload.
    ///
    /// Fails with [`DomainError::NoCandidates`] when a candidate list is empty.
    pub fn into_text(self) -> Result<String, DomainError> {
        match self {
            Completion::Text(text) => Ok(text),
            Completion::Message { content, .. } => Ok(content),
            Completion::Candidates(candidates) => {
                candidates.into_iter().next().ok_or(DomainError::NoCandidates)
            }
        }
    }
}

impl From<String> for Completion {
    fn from(text: String) -> Self {
        Completion::Text(text)
    }
}

impl From<&str> for Completion {
    fn from(text: &str) -> Self {
        Completion::text(text)
    }
}
