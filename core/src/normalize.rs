use lazy_static::lazy_static;
use regex::Regex;

use crate::Document;

lazy_static! {
    // Alternation is leftmost-first, so the markers win over the single-character class
    // whenever they start at the same position.
    static ref NOISE: Regex = Regex::new(r"[^a-zA-Z0-9]|Alt:|Alt-title:").expect("valid regex");
}

/// Replace every non-alphanumeric character and every `Alt:` / `Alt-title:` marker with a
/// single space, then lowercase.
pub fn normalize_text(text: &str) -> String {
    NOISE.replace_all(text, " ").to_ascii_lowercase()
}

/// Rewrite the normalized title and transcript of `doc` from its raw fields.
pub fn normalize(doc: &mut Document) {
    doc.title = normalize_text(&doc.raw_title);
    doc.transcript = normalize_text(&doc.raw_transcript);
}
