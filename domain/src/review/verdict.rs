//! Validation verdict parsing.

use serde::{Deserialize, Serialize};

/// Reviewer verdict on a generated answer.
///
/// Independent of the guardrail scan; the two may disagree and both are
/// reported as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub approved: bool,
    pub message: String,
}

/// Parse a reviewer reply into a [`ValidationResult`].
///
/// `approved` is true when the lowercased reply contains "approved"
/// anywhere. This also matches "disapproved" and "not approved"; callers
/// relying on the verdict should read `message` as well.
///
/// Returns `None` when the reply is blank, since the rationale must be
/// non-empty.
pub fn parse_validation_reply(reply: &str) -> Option<ValidationResult> {
    let message = reply.trim();
    if message.is_empty() {
        return None;
    }

    Some(ValidationResult {
        approved: message.to_lowercase().contains("approved"),
        message: message.to_string(),
    })
}
