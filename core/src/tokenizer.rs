use crate::Document;

/// Split normalized text on runs of whitespace. Order is preserved and no token is empty.
pub fn split_tokens(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_owned).collect()
}

/// Fill the title and transcript token sequences of `doc` from its normalized fields.
pub fn tokenize(doc: &mut Document) {
    doc.title_tokens = split_tokens(&doc.title);
    doc.transcript_tokens = split_tokens(&doc.transcript);
}
