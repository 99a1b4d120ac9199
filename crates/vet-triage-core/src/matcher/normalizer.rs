//! Text normalization applied to both sides of every comparison.
//!
//! Handles:
//! - Case folding ("Vómito" → "vómito")
//! - Diacritic stripping ("vómito" → "vomito", "pequeño" → "pequeno")
//! - Whitespace trimming and collapsing ("  tos   seca " → "tos seca")

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Normalize free text for comparison.
///
/// Lowercases first so that case mappings which introduce combining marks
/// (e.g. 'İ') are stripped in the same pass, keeping the function idempotent.
pub fn normalize(text: &str) -> String {
    let stripped: String = text
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect();

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split normalized text into words.
pub fn words(normalized: &str) -> impl Iterator<Item = &str> {
    normalized.split_whitespace()
}
