//! Parsing of free-text collaborator replies.
//!
//! These functions turn reranking and validation replies into structured
//! results. They are pure text matching with no I/O.
//!
//! | Function | Use Case | Rule |
//! |----------|----------|------|
//! | [`parse_citations`] | Reranking | `[n]` on a line, `1 <= n <= candidates` |
//! | [`select_cited`] | Reranking | Map citations to chunks, fall back to retrieval order |
//! | [`parse_validation_reply`] | Validation | Substring "approved", case-insensitive |

pub mod citation;
pub mod verdict;

pub use citation::{CitationScan, parse_citations, select_cited};
pub use verdict::{ValidationResult, parse_validation_reply};
