//! CLI command definitions

use clap::{Parser, ValueEnum};
use medguard_domain::SpeculationMarkers;
use std::path::PathBuf;

/// Output format for a pipeline turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Answer, ranked records, safety checks, and history
    Full,
    /// Only the answer and the two safety verdicts
    Answer,
    /// The full pipeline state as JSON
    Json,
}

impl From<OutputFormat> for medguard_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => Self::Full,
            OutputFormat::Answer => Self::Answer,
            OutputFormat::Json => Self::Json,
        }
    }
}

/// Speculation marker profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MarkersArg {
    /// Bare modal words ("may", "might", "possibly", ...)
    Word,
    /// Hedging phrases ("might have", "could be", ...)
    Phrase,
}

impl From<MarkersArg> for SpeculationMarkers {
    fn from(markers: MarkersArg) -> Self {
        match markers {
            MarkersArg::Word => SpeculationMarkers::Word,
            MarkersArg::Phrase => SpeculationMarkers::Phrase,
        }
    }
}

/// CLI arguments for medguard
#[derive(Parser, Debug)]
#[command(name = "medguard")]
#[command(author, version, about = "Guarded question answering over patient-record summaries")]
#[command(long_about = r#"
MedGuard answers clinical questions from indexed patient-record summaries
and screens every answer before showing it.

Each turn runs:
1. Retrieve: nearest record summaries from the vector index
2. Rerank: a model picks the most relevant summaries
3. Generate: a model answers from those summaries and the recent history
4. Guardrails: a lexical scan flags speculative or invented content
5. Validate: a reviewer model approves or rejects the answer

Guardrail and validation verdicts are reported side by side. They are
independent and may disagree.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./medguard.toml     Project-level config
3. ~/.config/medguard/config.toml   Global config

Example:
  medguard "What medications is the diabetic patient taking?"
  medguard --format json "Any documented drug allergies?"
  medguard --chat
"#)]
pub struct Cli {
    /// The clinical question (not required in chat mode)
    pub question: Option<String>,

    /// Start interactive multi-turn chat mode
    #[arg(short, long)]
    pub chat: bool,

    /// Output format (overrides [output].format)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Number of records to retrieve (overrides [pipeline].retrieval_k)
    #[arg(short = 'k', long, value_name = "N")]
    pub retrieval_k: Option<usize>,

    /// Number of records kept after reranking (overrides [pipeline].rerank_top_k)
    #[arg(long, value_name = "N")]
    pub top_k: Option<usize>,

    /// Speculation marker profile (overrides [pipeline].speculation_markers)
    #[arg(long, value_enum)]
    pub markers: Option<MarkersArg>,

    /// Path to the JSON record index (overrides [index].path)
    #[arg(long, value_name = "PATH")]
    pub index: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_question() {
        let cli = Cli::try_parse_from(["medguard", "What medications?"]).unwrap();
        assert_eq!(cli.question.as_deref(), Some("What medications?"));
        assert!(!cli.chat);
        assert!(cli.format.is_none());
    }

    #[test]
    fn test_parse_overrides() {
        let cli = Cli::try_parse_from([
            "medguard",
            "--format",
            "json",
            "-k",
            "8",
            "--top-k",
            "3",
            "--markers",
            "phrase",
            "-vv",
            "q",
        ])
        .unwrap();
        assert_eq!(cli.format, Some(OutputFormat::Json));
        assert_eq!(cli.retrieval_k, Some(8));
        assert_eq!(cli.top_k, Some(3));
        assert_eq!(
            cli.markers.map(SpeculationMarkers::from),
            Some(SpeculationMarkers::Phrase)
        );
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_chat_mode_needs_no_question() {
        let cli = Cli::try_parse_from(["medguard", "--chat"]).unwrap();
        assert!(cli.chat);
        assert!(cli.question.is_none());
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        assert!(Cli::try_parse_from(["medguard", "--format", "synthesis", "q"]).is_err());
    }

    #[test]
    fn test_format_maps_to_domain() {
        assert_eq!(
            medguard_domain::OutputFormat::from(OutputFormat::Answer),
            medguard_domain::OutputFormat::Answer
        );
    }
}
