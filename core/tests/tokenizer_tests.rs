use comicdex_core::normalize::normalize_text;
use comicdex_core::tokenizer::split_tokens;

#[test]
fn it_drops_alt_markers() {
    let words = split_tokens(&normalize_text("Hello, World! Alt: extra"));
    assert_eq!(words, vec!["hello", "world", "extra"]);
}

#[test]
fn it_drops_alt_title_markers() {
    let words = split_tokens(&normalize_text("[[Beret guy]] {{Alt-title: It's a trap}}"));
    assert_eq!(words, vec!["beret", "guy", "it", "s", "a", "trap"]);
}

#[test]
fn it_is_idempotent() {
    let once = normalize_text("Black Hat: \"Don't PANIC!\" (2009)");
    assert_eq!(normalize_text(&once), once);
    assert_eq!(split_tokens(&once), vec!["black", "hat", "don", "t", "panic", "2009"]);
}
