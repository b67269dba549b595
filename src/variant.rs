//! Deletion-neighborhood generation.
//!
//! A word's variants are every string obtainable by deleting between zero and
//! `max_distance` characters from it, keeping the remaining characters in
//! order. Two words are within edit distance `k` of each other only if their
//! `k`-deletion neighborhoods share at least one string, which is what lets the
//! index find candidates by key lookup instead of scanning every word.

use std::collections::BTreeSet;

/// Generate the deletion variants of `word` for up to `max_distance` deletions.
///
/// The word itself is always included. Deletions stop once the word is empty,
/// so `max_distance` values past the word length yield the same set.
///
/// ```
/// use fastss::variant::variants;
///
/// let keys = variants("aiu", 1);
/// assert_eq!(keys.len(), 4);
/// assert!(keys.contains("aiu") && keys.contains("iu") && keys.contains("au") && keys.contains("ai"));
/// ```
pub fn variants(word: &str, max_distance: usize) -> BTreeSet<String> {
    let mut result = BTreeSet::new();
    let mut level = BTreeSet::from([word.to_string()]);

    for _ in 0..max_distance {
        let next = delete_one(&level);
        result.append(&mut level);
        if next.is_empty() {
            break;
        }
        level = next;
    }
    result.append(&mut level);

    result
}

/// Generate the variants of `word` with exactly `deletions` characters removed.
///
/// Returns an empty set when `deletions` exceeds the number of characters.
pub fn variants_at(word: &str, deletions: usize) -> BTreeSet<String> {
    if deletions > word.chars().count() {
        return BTreeSet::new();
    }

    let mut level = BTreeSet::from([word.to_string()]);
    for _ in 0..deletions {
        level = delete_one(&level);
    }
    level
}

/// Every string reachable from a member of `words` by deleting one character.
fn delete_one(words: &BTreeSet<String>) -> BTreeSet<String> {
    let mut next = BTreeSet::new();

    for word in words {
        for (pos, ch) in word.char_indices() {
            let mut shorter = String::with_capacity(word.len() - ch.len_utf8());
            shorter.push_str(&word[..pos]);
            shorter.push_str(&word[pos + ch.len_utf8()..]);
            next.insert(shorter);
        }
    }

    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(words: &[&str]) -> BTreeSet<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_zero_distance_is_identity() {
        for word in ["", "a", "potato", "\u{3042}\u{3044}"] {
            assert_eq!(variants(word, 0), set(&[word]));
        }
    }

    #[test]
    fn test_variants_aiu() {
        assert_eq!(variants("aiu", 1), set(&["aiu", "iu", "au", "ai"]));
        assert_eq!(
            variants("aiu", 2),
            set(&["aiu", "iu", "au", "ai", "a", "i", "u"])
        );
        assert_eq!(
            variants("aiu", 3),
            set(&["aiu", "iu", "au", "ai", "a", "i", "u", ""])
        );
        assert_eq!(variants("aiu", 4), variants("aiu", 3));
    }

    #[test]
    fn test_non_contiguous_deletions() {
        // "ace" needs positions 1 and 3 removed, which are not adjacent.
        assert!(variants("abcde", 2).contains("ace"));
    }

    #[test]
    fn test_duplicates_collapse() {
        // C(4,1) = 4 position choices, but "aab" is produced twice.
        assert_eq!(variants_at("aaab", 1), set(&["aab", "aaa"]));
        assert_eq!(variants("aaaa", 2), set(&["aaaa", "aaa", "aa"]));
    }

    #[test]
    fn test_counts_match_binomial_for_distinct_characters() {
        let word = "abcdef";
        assert_eq!(variants_at(word, 0).len(), 1);
        assert_eq!(variants_at(word, 1).len(), 6);
        assert_eq!(variants_at(word, 2).len(), 15);
        assert_eq!(variants_at(word, 3).len(), 20);
        assert_eq!(variants(word, 2).len(), 1 + 6 + 15);
    }

    #[test]
    fn test_multibyte_characters_are_not_split() {
        let keys = variants("\u{3042}\u{3044}\u{3046}", 1);
        assert_eq!(
            keys,
            set(&[
                "\u{3042}\u{3044}\u{3046}",
                "\u{3044}\u{3046}",
                "\u{3042}\u{3046}",
                "\u{3042}\u{3044}",
            ])
        );
    }

    #[test]
    fn test_variants_at_past_length() {
        assert!(variants_at("ab", 3).is_empty());
        assert_eq!(variants_at("ab", 2), set(&[""]));
    }
}
