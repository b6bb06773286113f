//! Output formatting for finished pipeline turns

pub mod console;
pub mod formatter;
