//! Reasoning strategy implementations.
//!
//! This module provides the individual reasoning strategies:
//! - [`ReactExecutor`]: bounded thought→action→observation loop
//! - [`TreeOfThoughts`]: beam-pruned frontier search over proposed thoughts
//! - [`ReflexionEngine`]: single corrective pass driven by feedback
//! - [`ProgramOfThought`]: deterministic arithmetic execution trace
//!
//! The strategies share the final-answer marker helpers below.

mod program;
mod react;
mod reflexion;
mod tot;

pub use program::*;
pub use react::*;
pub use reflexion::*;
pub use tot::*;

// ============================================================================
// Shared Utilities
// ============================================================================

/// The literal phrase that signals an extracted conclusion.
pub(crate) const FINAL_ANSWER_MARKER: &str = "final answer";

/// Find the byte offset of the final-answer marker, case-insensitively.
///
/// The scan compares ASCII bytes so offsets stay valid for slicing the
/// original text even when it contains multibyte characters.
pub(crate) fn find_marker(text: &str) -> Option<usize> {
    let needle = FINAL_ANSWER_MARKER.as_bytes();
    if text.len() < needle.len() {
        return None;
    }
    text.as_bytes()
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle))
}

/// True when the text contains the final-answer marker anywhere.
pub(crate) fn contains_marker(text: &str) -> bool {
    find_marker(text).is_some()
}

/// Extract the answer text following the first `:` after the marker.
///
/// Returns `None` when the marker is absent or no `:` follows it — in the
/// latter case the thought does not yet carry an answer.
pub(crate) fn answer_after_marker(text: &str) -> Option<String> {
    let start = find_marker(text)?;
    let rest = &text[start + FINAL_ANSWER_MARKER.len()..];
    rest.find(':')
        .map(|idx| rest[idx + 1..].trim().to_string())
}

/// Strip a leading final-answer marker from a done-observation value.
///
/// When the trimmed text begins with the marker, everything up to the first
/// `:` after it is removed; with no `:`, the remainder after the marker is
/// returned. Text without a leading marker passes through trimmed.
pub(crate) fn strip_answer_marker(text: &str) -> String {
    let trimmed = text.trim();
    let needle = FINAL_ANSWER_MARKER.as_bytes();
    let has_leading_marker = trimmed.len() >= needle.len()
        && trimmed.as_bytes()[..needle.len()].eq_ignore_ascii_case(needle);
    if !has_leading_marker {
        return trimmed.to_string();
    }
    let rest = &trimmed[FINAL_ANSWER_MARKER.len()..];
    match rest.find(':') {
        Some(idx) => rest[idx + 1..].trim().to_string(),
        None => rest.trim().to_string(),
    }
}
