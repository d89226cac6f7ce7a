use std::sync::OnceLock;

use regex::Regex;

fn non_word_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9\s]").expect("valid regex"))
}

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("valid regex"))
}

/// Lowercases, turns everything but `[a-z0-9]` and whitespace into spaces,
/// and collapses whitespace runs. Digits are kept so "2 days" survives.
pub(crate) fn clean_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let lower = text.to_lowercase();
    let replaced = non_word_re().replace_all(&lower, " ");
    whitespace_re()
        .replace_all(&replaced, " ")
        .trim()
        .to_string()
}
