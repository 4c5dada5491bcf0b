//! # Name Normalization
//!
//! Collapses lexical variation in ingredient names (case, punctuation,
//! parenthetical notes, descriptive modifiers, plurals and regional synonyms)
//! into a single comparison key. Two ingredient references are the same
//! ingredient exactly when their normalized names are equal.
//!
//! ```rust
//! use pantry::normalize::normalize;
//!
//! assert_eq!(normalize("large eggs"), "egg");
//! assert_eq!(normalize("Fresh Coriander, chopped"), "cilantro");
//! ```

use crate::lexicon;
use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

static PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*\)").expect("Parenthetical pattern should be valid"));

static NON_ALPHA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z ]").expect("Non-alpha pattern should be valid"));

/// Map a free-text ingredient name to its comparison key.
///
/// The result contains only lowercase ASCII letters separated by single spaces,
/// and may be empty. The function is total and depends on nothing but its input.
pub fn normalize(raw_name: &str) -> String {
    let lowered = raw_name.trim().to_lowercase();
    let without_notes = PARENTHETICAL.replace_all(&lowered, "");
    let letters_only = NON_ALPHA.replace_all(&without_notes, "");

    let joined = letters_only
        .split_whitespace()
        .filter(|word| !lexicon::is_modifier(word))
        .map(depluralize)
        .collect::<Vec<_>>()
        .join(" ");

    let key = joined.replace(' ', "_");
    match lexicon::synonym(&key) {
        Some(canonical) => {
            trace!(raw = raw_name, key = %key, canonical, "Applied synonym");
            canonical.to_string()
        }
        None => {
            trace!(raw = raw_name, normalized = %joined, "Normalized ingredient name");
            joined
        }
    }
}

/// Reduce one lowercase word to its singular form.
///
/// Words ending in "-oes" are not special-cased: `"tomatoes"` becomes `"tomatoe"`.
pub fn depluralize(word: &str) -> String {
    if word.len() <= 3 {
        return word.to_string();
    }
    if let Some(stem) = word.strip_suffix("ies") {
        return format!("{stem}y");
    }
    if let Some(stem) = word.strip_suffix("ves") {
        return format!("{stem}f");
    }
    if ["ches", "shes", "sses", "xes", "zes"]
        .iter()
        .any(|suffix| word.ends_with(suffix))
    {
        return word[..word.len() - 2].to_string();
    }
    if word.ends_with('s') && !word.ends_with("ss") && !word.ends_with("us") {
        return word[..word.len() - 1].to_string();
    }
    word.to_string()
}
