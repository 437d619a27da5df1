//! Output normalizer — strips result tags down to the user-facing payload.
//!
//! Patterns are tried in order and the first match wins. `CONTENT`,
//! `RESOURCE` and `LISTING` carry multi-line payloads, so they capture to
//! the end of the text; every other tag captures to the end of its line.

use std::sync::LazyLock;

use regex_lite::Regex;

use crate::types::{ResultKind, TaggedResult};

const PATTERNS: &[&str] = &[
    r"(?im)^[ \t]*RESULT:[ \t]*(.*)$",
    r"(?im)^[ \t]*WEATHER:[ \t]*(.*)$",
    r"(?ims)^[ \t]*(?:CONTENT|RESOURCE):[ \t]*(.*)",
    r"(?im)^[ \t]*SUCCESS:[ \t]*(.*)$",
    r"(?ims)^[ \t]*LISTING:[ \t]*(.*)",
    r"(?im)^[ \t]*ERROR:[ \t]*(.*)$",
];

static TAGS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    PATTERNS
        .iter()
        .filter_map(|p| Regex::new(p).ok())
        .collect()
});

/// Sanitized form of a tool result, taken from its payload directly.
/// `IMAGE` has no tag pattern, so it keeps its rendered form.
pub fn normalize_result(result: &TaggedResult) -> String {
    match result.kind {
        ResultKind::Image => result.to_string().trim().to_string(),
        _ => result.payload.trim().to_string(),
    }
}

/// Sanitize free text from the model.
pub fn normalize(text: &str) -> String {
    for re in TAGS.iter() {
        if let Some(payload) = re.captures(text).and_then(|c| c.get(1)) {
            return payload.as_str().trim().to_string();
        }
    }

    text.lines()
        .map(str::trim)
        .rev()
        .find(|l| !l.is_empty())
        .unwrap_or_default()
        .to_string()
}
