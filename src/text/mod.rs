//! Message normalization ahead of intent classification.
//!
//! Lowercases, strips diacritics via canonical decomposition, applies a
//! small table of common-misspelling substitutions, and collapses
//! whitespace. Pure and idempotent; classification rules are written
//! against this normalized form.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Token-level substitutions for frequent shorthand and typos.
///
/// Applied after case/accent folding, so entries are themselves normalized.
const COMMON_MISTAKES: &[(&str, &str)] = &[
    ("bjr", "bonjour"),
    ("cc", "coucou"),
    ("cv", "ca va"),
    ("cava", "ca va"),
    ("mrc", "merci"),
    ("emil", "email"),
    ("ameil", "email"),
    ("meil", "email"),
    ("eml", "email"),
    ("prnom", "prenom"),
    ("prnm", "prenom"),
    ("nm", "nom"),
    ("rle", "role"),
];

/// Normalize a raw message for rule matching.
///
/// Case-folds, removes combining marks after NFD decomposition, substitutes
/// known misspellings token by token, collapses whitespace runs and trims.
/// Empty input yields empty output, and the function is idempotent:
/// `normalize(normalize(s)) == normalize(s)`.
pub fn normalize(raw: &str) -> String {
    let folded: String = raw
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect();

    let tokens: Vec<&str> = folded
        .split_whitespace()
        .map(|token| {
            COMMON_MISTAKES
                .iter()
                .find(|(from, _)| *from == token)
                .map_or(token, |(_, to)| *to)
        })
        .collect();

    tokens.join(" ")
}
