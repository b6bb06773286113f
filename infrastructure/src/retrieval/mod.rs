//! Vector-search adapters
//!
//! The record index is a flat JSON file of `(patient_id, summary, embedding)`
//! triples. Queries are encoded through an [`EmbeddingProvider`] and matched
//! by exact L2 distance.

pub mod embedding;
pub mod flat_index;
pub mod search;

pub use embedding::{EmbeddingProvider, OpenAiEmbeddingProvider};
pub use flat_index::FlatIndex;
pub use search::IndexedRecordSearch;
