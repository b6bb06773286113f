//! Interactive chat module
//!
//! Provides a readline-based multi-turn chat interface. Each turn is seeded
//! with the previous turn's final state so the conversation carries over.

mod repl;

pub use repl::{ChatRepl, ReplCommand};
