use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Folds text for comparison: lower-cases, decomposes (NFD) and drops every combining mark.
///
/// "Politécnico" and "POLITECNICO" both become "politecnico". Lower-casing runs first because
/// some case mappings introduce combining marks ("İ" lower-cases to "i\u{307}").
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// Splits a raw query into normalized search tokens.
///
/// Tokens are whitespace-delimited, stripped of surrounding punctuation, and never empty,
/// so a blank or punctuation-only query yields no tokens.
pub fn tokenize_query(query: &str) -> Vec<String> {
    normalize(query)
        .split_whitespace()
        .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}
