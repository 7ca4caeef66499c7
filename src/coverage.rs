//! Checking that a table covers the characters a text needs.

use std::collections::BTreeSet;

use crate::FeatureEntry;

/// Kana, CJK punctuation and half/full-width forms are written without
/// reference patterns.
fn is_exempt(c: char) -> bool {
    matches!(c, '\u{3000}'..='\u{30FF}' | '\u{FF00}'..='\u{FF9F}')
        || c.is_whitespace()
        || c.is_ascii_punctuation()
}

/// Distinct characters of `text` that need a pattern, in code point order.
pub fn required_characters(text: &str) -> BTreeSet<char> {
    text.chars().filter(|&c| !is_exempt(c)).collect()
}

/// Required characters with no entry in the table, in code point order.
pub fn missing_characters(required: &BTreeSet<char>, entries: &[FeatureEntry]) -> Vec<char> {
    let covered: BTreeSet<char> = entries.iter().map(|e| e.character).collect();
    required.difference(&covered).copied().collect()
}
