//! Patient-record retrieval results.

pub mod chunk;

pub use chunk::{Chunk, is_rank_monotonic};
