//! Answer-string checking shared by the practice modes.

/// Normalizes an answer for comparison: surrounding whitespace trimmed,
/// then lowercased.
pub fn normalize(input: &str) -> String {
    input.trim().to_lowercase()
}

/// Checks a typed answer against the expected one, ignoring case and
/// surrounding whitespace.
pub fn is_exact_match(answer: &str, expected: &str) -> bool {
    normalize(answer) == normalize(expected)
}

/// Checks that a practice sentence actually uses the target word. Empty
/// sentences never pass.
pub fn sentence_uses_word(sentence: &str, word: &str) -> bool {
    if sentence.trim().is_empty() {
        return false;
    }
    sentence.to_lowercase().contains(&word.to_lowercase())
}
