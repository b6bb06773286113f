//! Lexical guardrail screening of generated answers.
//!
//! The check is a case-insensitive substring scan against two closed
//! marker lists. It looks only at the text: no query, no history, no
//! external calls.

use serde::{Deserialize, Serialize};

/// Inconsistency markers shared by every speculation profile.
pub const HALLUCINATION_MARKERS: &[&str] =
    &["clearly not true", "doesn't match", "not in patient record"];

const WORD_MARKERS: &[&str] = &["might", "could", "possibly", "likely", "may"];

const PHRASE_MARKERS: &[&str] = &[
    "might have",
    "could be",
    "possibly",
    "likely has",
    "it seems that",
];

const SPECULATION_FOUND: &str = "Speculative language found.";
const SPECULATION_CLEAR: &str = "Clear of speculation.";
const HALLUCINATION_FOUND: &str = "Possible inconsistency detected.";
const HALLUCINATION_CLEAR: &str = "Consistent with context.";

/// Which closed list of speculative markers to scan for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeculationMarkers {
    /// Single hedging words ("might", "could", "possibly", "likely", "may").
    #[default]
    Word,
    /// Hedging phrases ("might have", "could be", "it seems that", ...).
    Phrase,
}

impl SpeculationMarkers {
    pub fn markers(&self) -> &'static [&'static str] {
        match self {
            SpeculationMarkers::Word => WORD_MARKERS,
            SpeculationMarkers::Phrase => PHRASE_MARKERS,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SpeculationMarkers::Word => "word",
            SpeculationMarkers::Phrase => "phrase",
        }
    }
}

impl std::fmt::Display for SpeculationMarkers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SpeculationMarkers {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "word" | "words" => Ok(SpeculationMarkers::Word),
            "phrase" | "phrases" => Ok(SpeculationMarkers::Phrase),
            other => Err(format!("unknown speculation marker profile: {other}")),
        }
    }
}

/// Outcome of the lexical guardrail scan.
///
/// `safe_to_use` is derived from the two flags at construction and has no
/// setter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardrailResult {
    speculation_flag: bool,
    speculation_msg: String,
    hallucination_flag: bool,
    hallucination_msg: String,
    safe_to_use: bool,
}

impl GuardrailResult {
    pub fn from_flags(speculation_flag: bool, hallucination_flag: bool) -> Self {
        let speculation_msg = if speculation_flag {
            SPECULATION_FOUND
        } else {
            SPECULATION_CLEAR
        };
        let hallucination_msg = if hallucination_flag {
            HALLUCINATION_FOUND
        } else {
            HALLUCINATION_CLEAR
        };

        Self {
            speculation_flag,
            speculation_msg: speculation_msg.to_string(),
            hallucination_flag,
            hallucination_msg: hallucination_msg.to_string(),
            safe_to_use: !speculation_flag && !hallucination_flag,
        }
    }

    pub fn speculation_flag(&self) -> bool {
        self.speculation_flag
    }

    pub fn speculation_msg(&self) -> &str {
        &self.speculation_msg
    }

    pub fn hallucination_flag(&self) -> bool {
        self.hallucination_flag
    }

    pub fn hallucination_msg(&self) -> &str {
        &self.hallucination_msg
    }

    pub fn safe_to_use(&self) -> bool {
        self.safe_to_use
    }
}

/// Stateless lexical guardrail checker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GuardrailChecker {
    markers: SpeculationMarkers,
}

impl GuardrailChecker {
    pub fn new(markers: SpeculationMarkers) -> Self {
        Self { markers }
    }

    pub fn markers(&self) -> SpeculationMarkers {
        self.markers
    }

    /// Scan `text` for speculative and inconsistency markers.
    pub fn check(&self, text: &str) -> GuardrailResult {
        let lowered = text.to_lowercase();
        let speculation_flag = self.markers.markers().iter().any(|m| lowered.contains(m));
        let hallucination_flag = HALLUCINATION_MARKERS.iter().any(|m| lowered.contains(m));
        GuardrailResult::from_flags(speculation_flag, hallucination_flag)
    }
}
