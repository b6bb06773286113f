//! Retrieved patient-record chunk

use serde::{Deserialize, Serialize};

/// One retrieved patient-record summary (Entity)
///
/// `rank` is the 1-based position of the chunk within the sequence that
/// produced it. `score` is the raw value reported by the vector-search
/// collaborator; its direction (distance or similarity) belongs to that
/// collaborator and is never reinterpreted here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub rank: usize,
    pub patient_id: String,
    pub summary: String,
    pub score: f32,
}

impl Chunk {
    pub fn new(
        rank: usize,
        patient_id: impl Into<String>,
        summary: impl Into<String>,
        score: f32,
    ) -> Self {
        Self {
            rank,
            patient_id: patient_id.into(),
            summary: summary.into(),
            score,
        }
    }

    /// Return a copy of this chunk placed at a new 1-based position.
    pub fn at_rank(&self, rank: usize) -> Self {
        Self {
            rank,
            ..self.clone()
        }
    }
}

/// Check that ranks strictly increase with position.
pub fn is_rank_monotonic(chunks: &[Chunk]) -> bool {
    chunks.windows(2).all(|pair| pair[0].rank < pair[1].rank)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_rank_keeps_payload() {
        let chunk = Chunk::new(3, "p-3", "Hypertension, lisinopril.", 0.42);
        let moved = chunk.at_rank(1);
        assert_eq!(moved.rank, 1);
        assert_eq!(moved.patient_id, "p-3");
        assert_eq!(moved.summary, chunk.summary);
        assert_eq!(moved.score, chunk.score);
    }

    #[test]
    fn test_rank_monotonic() {
        let ordered = vec![Chunk::new(1, "a", "x", 0.1), Chunk::new(2, "b", "y", 0.2)];
        let reversed = vec![Chunk::new(2, "b", "y", 0.2), Chunk::new(1, "a", "x", 0.1)];
        assert!(is_rank_monotonic(&ordered));
        assert!(!is_rank_monotonic(&reversed));
        assert!(is_rank_monotonic(&[]));
    }
}
