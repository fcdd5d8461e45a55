//! Movement identifier normalisation.
//!
//! Identifiers are lowercase slugs made of alphanumeric characters joined by
//! underscores, at most [`MAX_ID_LEN`] characters long.

use std::collections::HashSet;

/// Maximum number of characters kept by [`normalize`].
pub const MAX_ID_LEN: usize = 40;

/// Character placed between the words of a slug.
pub const JOINER: char = '_';

/// Base used by [`resolve_unique`] when a name normalises to an empty slug.
pub const FALLBACK_ID: &str = "movement";

/// Derives the slug for a movement name.
pub fn normalize(name: &str) -> String {
    let mut buf = [0; 4];
    let joiner: &str = JOINER.encode_utf8(&mut buf);
    let lowered = name.trim().to_lowercase();
    let joined = lowered.split_whitespace().collect::<Vec<_>>().join(joiner);
    joined
        .chars()
        .filter(|ch| ch.is_alphanumeric() || *ch == JOINER)
        .take(MAX_ID_LEN)
        .collect()
}

/// Derives a slug for `name` that is not present in `existing`, appending
/// `_2`, `_3`, ... to the normalised base until it is unique.
pub fn resolve_unique(name: &str, existing: &HashSet<String>) -> String {
    let mut base = normalize(name);
    if base.is_empty() {
        base = FALLBACK_ID.to_string();
    }
    if !existing.contains(&base) {
        return base;
    }
    (2..)
        .map(|suffix| format!("{base}{JOINER}{suffix}"))
        .find(|candidate| !existing.contains(candidate))
        .unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_whitespace_and_strips_punctuation() {
        assert_eq!(normalize("  Overhead   Press! "), "overhead_press");
        assert_eq!(normalize("Romanian Dead-lift (RDL)"), "romanian_deadlift_rdl");
    }

    #[test]
    fn words_are_joined_with_joiner() {
        let slug = normalize("Bulgarian Split\tSquat");
        assert_eq!(slug.split(JOINER).collect::<Vec<_>>(), vec!["bulgarian", "split", "squat"]);
    }

    #[test]
    fn truncates_to_max_length() {
        let long = "a".repeat(60);
        assert_eq!(normalize(&long).chars().count(), MAX_ID_LEN);
    }

    #[test]
    fn appends_incrementing_suffix_on_collision() {
        let mut existing = HashSet::new();
        existing.insert("overhead_press".to_string());
        assert_eq!(resolve_unique("Overhead Press", &existing), "overhead_press_2");
        existing.insert("overhead_press_2".to_string());
        assert_eq!(resolve_unique("overhead  press", &existing), "overhead_press_3");
    }

    #[test]
    fn empty_slug_uses_fallback_base() {
        let existing = HashSet::new();
        assert_eq!(resolve_unique("!!!", &existing), FALLBACK_ID);
    }
}
