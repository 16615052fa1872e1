//! User input sanitization.

/// Symbols allowed through the filter alongside letters and digits.
const SAFE_SYMBOLS: &str = " .,~-!/@#%*&$+÷€£¥×=;:?<>[]{}|\\\"'()";

/// Sanitize user input: drop unsafe characters, normalize whitespace, and
/// truncate to at most `max_words` words.
pub fn sanitize(input: &str, max_words: usize) -> String {
    let cleaned: String = input.chars().filter(|c| is_safe_char(*c)).collect();
    truncate_words(&cleaned, max_words)
}

fn is_safe_char(c: char) -> bool {
    c.is_alphanumeric() || SAFE_SYMBOLS.contains(c)
}

fn truncate_words(input: &str, max_words: usize) -> String {
    let words: Vec<&str> = input.split_whitespace().collect();
    let take = words.len().min(max_words);
    words[..take].join(" ")
}
