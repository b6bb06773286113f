//! Output formatter trait

use medguard_domain::{OutputFormat, PipelineState};

/// Trait for formatting finished pipeline turns
pub trait OutputFormatter {
    /// Answer, ranked records, both safety verdicts, and history
    fn format(&self, state: &PipelineState) -> String;

    /// Format the whole state as JSON
    fn format_json(&self, state: &PipelineState) -> String;

    /// Answer and safety verdicts only (concise output)
    fn format_answer_only(&self, state: &PipelineState) -> String;

    /// Format according to `format`
    fn render(&self, state: &PipelineState, format: OutputFormat) -> String {
        match format {
            OutputFormat::Full => self.format(state),
            OutputFormat::Answer => self.format_answer_only(state),
            OutputFormat::Json => self.format_json(state),
        }
    }
}
