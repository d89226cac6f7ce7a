use std::collections::HashSet;

use crate::utils::text::clean_text;

fn trim_suffixes(word: &str) -> &str {
    let word = word.strip_suffix("ing").unwrap_or(word);
    match word.strip_suffix('s') {
        Some(stem) if word.len() > 3 => stem,
        _ => word,
    }
}

/// Cleans free text into unique word tokens, first occurrence first.
///
/// Each word loses a trailing "ing", then a trailing "s" when it is still
/// longer than three characters ("coughing" -> "cough", "fevers" -> "fever",
/// "gas" stays "gas").
pub fn extract_tokens(text: &str) -> Vec<String> {
    let cleaned = clean_text(text);
    let mut seen: HashSet<&str> = HashSet::new();
    let mut out = Vec::new();
    for word in cleaned.split_whitespace() {
        let token = trim_suffixes(word);
        if seen.insert(token) {
            out.push(token.to_string());
        }
    }
    out
}

/// Splits a catalog symptom phrase into words without suffix trimming.
pub(crate) fn phrase_words(phrase: &str) -> Vec<String> {
    clean_text(phrase)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}
