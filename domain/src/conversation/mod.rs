//! Multi-turn conversation memory.

pub mod history;

pub use history::{ConversationHistory, ConversationTurn};
