//! Conversation history
//!
//! A conversation is an ordered, append-only log of [`ConversationTurn`]s,
//! oldest first. Appending never mutates an existing history value: it
//! returns a new one, so a caller still holding the previous history sees
//! it unchanged.

use serde::{Deserialize, Serialize};

/// One query/answer exchange (Value Object)
///
/// `response` is always the flattened answer text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    query: String,
    response: String,
}

impl ConversationTurn {
    pub fn new(query: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            response: response.into(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn response(&self) -> &str {
        &self.response
    }
}

/// Ordered conversation log, oldest turn first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationHistory {
    turns: Vec<ConversationTurn>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a new history with one turn appended at the end.
    pub fn append_turn(&self, query: impl Into<String>, response: impl Into<String>) -> Self {
        let mut turns = Vec::with_capacity(self.turns.len() + 1);
        turns.extend_from_slice(&self.turns);
        turns.push(ConversationTurn::new(query, response));
        Self { turns }
    }

    /// The most recent `max_turns` turns in chronological order.
    ///
    /// `None` exposes the whole history.
    pub fn window(&self, max_turns: Option<usize>) -> &[ConversationTurn] {
        match max_turns {
            Some(max) if max < self.turns.len() => &self.turns[self.turns.len() - max..],
            _ => &self.turns,
        }
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

impl From<Vec<ConversationTurn>> for ConversationHistory {
    fn from(turns: Vec<ConversationTurn>) -> Self {
        Self { turns }
    }
}
