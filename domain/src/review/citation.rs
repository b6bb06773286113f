//! Citation parsing for collaborator-driven reranking.
//!
//! The reranking collaborator answers in free text. A line counts as a
//! citation only when it holds both `[` and `]`; the text between the first
//! `[` and the first `]` must parse as an integer in `1..=candidates`.
//! Anything else on that line is a malformed citation and is skipped.

use crate::record::Chunk;

/// Result of scanning a reranking reply for bracketed citations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CitationScan {
    /// Valid 1-based positions in the order they were cited (duplicates kept).
    pub positions: Vec<usize>,
    /// Bracketed lines whose contents did not parse as an integer.
    pub malformed: usize,
    /// Integers that fell outside `1..=candidates`.
    pub out_of_range: usize,
}

impl CitationScan {
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Scan `reply` line by line for bracketed citations of `candidates` items.
pub fn parse_citations(reply: &str, candidates: usize) -> CitationScan {
    let mut scan = CitationScan::default();

    for line in reply.lines() {
        let (Some(open), Some(close)) = (line.find('['), line.find(']')) else {
            continue;
        };

        let parsed = if close > open {
            line[open + 1..close].trim().parse::<i64>().ok()
        } else {
            None
        };

        match parsed {
            Some(n) if n >= 1 && (n as u64) <= candidates as u64 => {
                scan.positions.push(n as usize);
            }
            Some(_) => scan.out_of_range += 1,
            None => scan.malformed += 1,
        }
    }

    scan
}

/// Map cited positions back onto `chunks`, keeping at most `top_k`.
///
/// Positions index the original slice, so a repeated citation resolves to
/// the same chunk and only its first occurrence is kept. The selected
/// chunks are renumbered `1..` in citation order. With no citations the
/// first `top_k` chunks are returned untouched, in retrieval order.
pub fn select_cited(chunks: &[Chunk], positions: &[usize], top_k: usize) -> Vec<Chunk> {
    if positions.is_empty() {
        return chunks.iter().take(top_k).cloned().collect();
    }

    let mut seen = vec![false; chunks.len()];
    let mut selected = Vec::with_capacity(top_k.min(positions.len()));

    for &position in positions {
        if selected.len() == top_k {
            break;
        }
        let Some(index) = position.checked_sub(1) else {
            continue;
        };
        if index >= chunks.len() || seen[index] {
            continue;
        }
        seen[index] = true;
        selected.push(chunks[index].at_rank(selected.len() + 1));
    }

    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::is_rank_monotonic;

    fn chunks(n: usize) -> Vec<Chunk> {
        (1..=n)
            .map(|i| Chunk::new(i, format!("p-{i}"), format!("summary {i}"), i as f32 * 0.1))
            .collect()
    }

    #[test]
    fn test_parse_citations_in_reply_order() {
        let reply = "Most relevant:\n[3] Patient on lisinopril\n[1] Diabetic\nnoise line";
        let scan = parse_citations(reply, 5);
        assert_eq!(scan.positions, vec![3, 1]);
        assert_eq!(scan.malformed, 0);
    }

    #[test]
    fn test_parse_citations_skips_malformed_and_out_of_range() {
        let reply = "[abc] not a number\n[0] zero\n[9] too big\n] [2 reversed\n[ 2 ] spaced";
        let scan = parse_citations(reply, 5);
        assert_eq!(scan.positions, vec![2]);
        assert_eq!(scan.malformed, 2);
        assert_eq!(scan.out_of_range, 2);
    }

    #[test]
    fn test_parse_citations_only_first_bracket_per_line() {
        let scan = parse_citations("[2] and also [4]", 5);
        assert_eq!(scan.positions, vec![2]);
    }

    #[test]
    fn test_parse_citations_keeps_duplicates() {
        let scan = parse_citations("[2]\n[2]\n[1]", 3);
        assert_eq!(scan.positions, vec![2, 2, 1]);
    }

    #[test]
    fn test_no_brackets_is_empty() {
        let scan = parse_citations("The second and fourth summaries are relevant.", 5);
        assert!(scan.is_empty());
    }

    #[test]
    fn test_select_cited_follows_citation_order() {
        let input = chunks(5);
        let selected = select_cited(&input, &[4, 2], 5);
        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0].patient_id, "p-4");
        assert_eq!(selected[1].patient_id, "p-2");
        assert!(is_rank_monotonic(&selected));
        assert_eq!(selected[0].rank, 1);
        assert_eq!(selected[0].score, input[3].score);
    }

    #[test]
    fn test_select_cited_dedupes_and_truncates() {
        let input = chunks(5);
        let selected = select_cited(&input, &[2, 2, 5, 1, 3], 3);
        let ids: Vec<_> = selected.iter().map(|c| c.patient_id.as_str()).collect();
        assert_eq!(ids, vec!["p-2", "p-5", "p-1"]);
    }

    #[test]
    fn test_select_cited_falls_back_to_retrieval_order() {
        let input = chunks(7);
        let selected = select_cited(&input, &[], 5);
        assert_eq!(selected, input[..5].to_vec());

        let short = chunks(2);
        assert_eq!(select_cited(&short, &[], 5), short);
    }

    #[test]
    fn test_select_cited_skips_position_zero() {
        let input = chunks(3);
        let selected = select_cited(&input, &[0, 1], 5);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].patient_id, "p-1");
        assert_eq!(selected[0].rank, 1);

        assert!(select_cited(&input, &[0], 5).is_empty());
    }
}
