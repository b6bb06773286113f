//! Text helpers for log lines and console previews of clinical text.

/// Truncate a string to at most `max_bytes` without splitting a UTF-8
/// character.
pub fn truncate_str(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Single-line preview of a query, summary, or answer.
///
/// Whitespace runs (including newlines) collapse to one space, then the
/// result is cut to `max_bytes` with a trailing "..." when anything was
/// dropped.
pub fn one_line_preview(text: &str, max_bytes: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let cut = truncate_str(&collapsed, max_bytes);
    if cut.len() < collapsed.len() {
        format!("{}...", cut.trim_end())
    } else {
        collapsed
    }
}
