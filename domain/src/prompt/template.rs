//! Prompt templates for the pipeline stages

use crate::conversation::ConversationTurn;
use crate::record::Chunk;

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// Role statement opening the answer prompt
    pub fn answer_role() -> &'static str {
        "You are a clinical assistant. Based on the following patient records and the user query, provide a concise and medically relevant answer."
    }

    /// Render prior turns as `Q:`/`A:` line pairs, oldest first.
    ///
    /// Returns an empty string for an empty history.
    pub fn history_block(history: &[ConversationTurn]) -> String {
        history
            .iter()
            .map(|turn| format!("Q: {}\nA: {}", turn.query(), turn.response()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Patient-record context: history block, blank line, then the summaries.
    pub fn record_context(ranked: &[Chunk], history: &[ConversationTurn]) -> String {
        let summaries = ranked
            .iter()
            .map(|chunk| chunk.summary.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        if history.is_empty() {
            summaries
        } else {
            format!("{}\n\n{}", Self::history_block(history), summaries)
        }
    }

    /// Grounded answer prompt sent to the generator.
    ///
    /// Deterministic for identical inputs.
    pub fn answer_prompt(ranked: &[Chunk], query: &str, history: &[ConversationTurn]) -> String {
        format!(
            r#"{}

Patient Record:
{}

User Query:
{}

Answer:"#,
            Self::answer_role(),
            Self::record_context(ranked, history),
            query
        )
    }

    /// Prompt asking the reranking collaborator to cite relevant candidates.
    ///
    /// Candidates are tagged `[1]`, `[2]`, ... in input order.
    pub fn rerank_prompt(query: &str, chunks: &[Chunk]) -> String {
        let candidates = chunks
            .iter()
            .enumerate()
            .map(|(i, chunk)| format!("[{}] {}", i + 1, chunk.summary))
            .collect::<Vec<_>>()
            .join("\n\n");

        format!(
            "Given the clinical query:\n\"{}\"\n\nRank the following summaries by their relevance:\n\n{}\n\nReturn the top relevant summaries.",
            query, candidates
        )
    }

    /// Review prompt for the validation collaborator
    pub fn validation_prompt(query: &str, response: &str) -> String {
        format!(
            r#"You are a medical reviewer with access to general medical knowledge.

Given the user query:
"{}"

And the assistant's response:
"{}"

Assess if the response is:
1. Medically plausible
2. Not speculative or misleading
3. Grounded in real medical context

Return a short summary and mark it as Approved or Rejected."#,
            query, response
        )
    }
}
