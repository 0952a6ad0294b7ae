//! Lexical text matching
//!
//! Case-insensitive, whitespace-normalized substring containment. This is
//! deliberately not an NLP layer: there is no stemming and no negation
//! handling, so "not pregnant" still matches the term "pregnant". That
//! precision limitation is a documented property of the matcher, not a bug.

use std::collections::BTreeSet;

/// Lowercase the text and collapse runs of whitespace to single spaces.
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Return the subset of `phrases` that occur in `text`.
pub fn contains_any<S: AsRef<str>>(text: &str, phrases: &[S]) -> BTreeSet<String> {
    let haystack = normalize(text);
    phrases
        .iter()
        .map(|p| p.as_ref())
        .filter(|p| !p.is_empty() && haystack.contains(&normalize(p)))
        .map(str::to_string)
        .collect()
}

/// Return the terms present in both texts.
///
/// Used for the risk cross-check: a term is actionable only when the user's
/// text and the product's contraindications mention it.
pub fn matches_both<S: AsRef<str>>(text_a: &str, text_b: &str, terms: &[S]) -> BTreeSet<String> {
    let in_a = contains_any(text_a, terms);
    let in_b = contains_any(text_b, terms);
    in_a.intersection(&in_b).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  Hello   WORLD \n"), "hello world");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_contains_any_case_insensitive() {
        let phrases = ["thyroid", "pregnancy"];
        let found = contains_any("Can I take this with a THYROID condition?", &phrases);
        assert_eq!(found, BTreeSet::from(["thyroid".to_string()]));
    }

    #[test]
    fn test_contains_any_multiword_phrase() {
        let phrases = ["safe for everyone"];
        let found = contains_any("It is Safe   for\teveryone to use.", &phrases);
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_contains_any_no_match() {
        let phrases = ["liver"];
        assert!(contains_any("all about kidneys", &phrases).is_empty());
    }

    #[test]
    fn test_matches_both_requires_overlap() {
        let terms = ["pregnancy", "thyroid"];
        let overlap = matches_both(
            "I have thyroid issues and I'm pregnant",
            "Caution in thyroid disorders",
            &terms,
        );
        // "pregnant" is in the query but "pregnancy" is not, and the
        // contraindications never mention pregnancy either way.
        assert_eq!(overlap, BTreeSet::from(["thyroid".to_string()]));
    }

    #[test]
    fn test_matches_both_empty_when_disjoint() {
        let terms = ["pregnancy", "thyroid"];
        assert!(matches_both("thyroid question", "avoid during pregnancy", &terms).is_empty());
    }

    #[test]
    fn test_negation_is_not_understood() {
        // Known limitation: purely lexical matching.
        let phrases = ["pregnant"];
        let found = contains_any("I am not pregnant", &phrases);
        assert!(!found.is_empty());
    }
}
