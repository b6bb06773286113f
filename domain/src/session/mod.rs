//! Messages and completions exchanged with text-generation collaborators

pub mod completion;
pub mod entities;

pub use completion::Completion;
pub use entities::{Message, Role};
