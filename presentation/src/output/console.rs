//! Console output formatter for pipeline turns

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use medguard_domain::util::one_line_preview;
use medguard_domain::{ConversationHistory, GuardrailResult, PipelineState, ValidationResult};

/// Formats pipeline turns for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete turn
    pub fn format(state: &PipelineState) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("MedGuard Answer"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n",
            "Question:".cyan().bold(),
            state.query()
        ));

        output.push_str(&Self::section_header("Answer"));
        output.push_str(&format!("\n{}\n", Self::indent(state.response(), "  ")));

        output.push_str(&Self::section_header("Ranked Records"));
        if state.ranked_chunks().is_empty() {
            output.push_str(&format!("\n  {}\n", "(no records)".dimmed()));
        } else {
            output.push('\n');
            for chunk in state.ranked_chunks() {
                output.push_str(&format!(
                    "  {} {} {}\n      {}\n",
                    format!("[{}]", chunk.rank).yellow().bold(),
                    chunk.patient_id.bold(),
                    format!("(distance {:.4})", chunk.score).dimmed(),
                    one_line_preview(&chunk.summary, 200)
                ));
            }
        }

        output.push_str(&Self::section_header("Safety Checks"));
        output.push('\n');
        output.push_str(&Self::verdicts(state));

        output.push_str(&Self::section_header("History"));
        output.push_str(&format!("\n{}", Self::format_history(state.history())));

        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(state: &PipelineState) -> String {
        serde_json::to_string_pretty(&state.to_json()).unwrap_or_else(|_| "{}".to_string())
    }

    /// Answer plus the two verdicts (concise output)
    pub fn format_answer_only(state: &PipelineState) -> String {
        let mut output = String::new();

        output.push_str(&format!("{} {}\n\n", "Q:".bold(), state.query()));
        output.push_str(state.response());
        output.push_str("\n\n");
        output.push_str(&Self::verdicts(state));

        output
    }

    /// Numbered Q/A list of a conversation history
    pub fn format_history(history: &ConversationHistory) -> String {
        if history.is_empty() {
            return format!("  {}\n", "(no turns yet)".dimmed());
        }

        let mut output = String::new();
        for (i, turn) in history.turns().iter().enumerate() {
            output.push_str(&format!(
                "  {} {} {}\n      {} {}\n",
                format!("{}.", i + 1).dimmed(),
                "Q:".bold(),
                turn.query(),
                "A:".bold(),
                one_line_preview(turn.response(), 200)
            ));
        }
        output
    }

    /// Guardrail and validation verdicts, one line each, never merged.
    fn verdicts(state: &PipelineState) -> String {
        format!(
            "{}\n{}\n",
            Self::guardrail_line(state.guardrails()),
            Self::validation_line(state.validation())
        )
    }

    fn guardrail_line(guardrails: Option<&GuardrailResult>) -> String {
        let label = format!("{:<12}", "Guardrails:").cyan().bold();
        match guardrails {
            Some(g) => {
                let verdict = if g.safe_to_use() {
                    "SAFE".green().bold()
                } else {
                    "FLAGGED".red().bold()
                };
                format!(
                    "  {} {}  {} | {}",
                    label,
                    verdict,
                    g.speculation_msg(),
                    g.hallucination_msg()
                )
            }
            None => format!("  {} {}", label, "not run".dimmed()),
        }
    }

    fn validation_line(validation: Option<&ValidationResult>) -> String {
        let label = format!("{:<12}", "Validation:").cyan().bold();
        match validation {
            Some(v) => {
                let verdict = if v.approved {
                    "APPROVED".green().bold()
                } else {
                    "REJECTED".red().bold()
                };
                format!(
                    "  {} {}  {}",
                    label,
                    verdict,
                    one_line_preview(&v.message, 160)
                )
            }
            None => format!("  {} {}", label, "not run".dimmed()),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, state: &PipelineState) -> String {
        Self::format(state)
    }

    fn format_json(&self, state: &PipelineState) -> String {
        Self::format_json(state)
    }

    fn format_answer_only(&self, state: &PipelineState) -> String {
        Self::format_answer_only(state)
    }
}
