//! Lenient markdown code-fence stripping.
//!
//! Model-backed services sometimes wrap their JSON reply in a markdown code
//! fence (` ```json ... ``` `). Stripping is strip-if-present: one leading
//! fence marker (with optional language tag) and one trailing marker are
//! removed when found, anything else passes through untouched. Fence pairing
//! is deliberately not validated.

const FENCE: &str = "```";

/// Strip a surrounding markdown code fence from `body`, if present.
#[must_use]
pub fn strip_code_fence(body: &str) -> &str {
    let mut text = body.trim();

    if let Some(rest) = text.strip_prefix(FENCE) {
        // The opening marker may carry a language tag; drop the whole line.
        text = match rest.find('\n') {
            Some(idx) => &rest[idx + 1..],
            None => rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric()),
        };
    }

    if let Some(rest) = text.trim_end().strip_suffix(FENCE) {
        text = rest;
    }

    text.trim()
}
