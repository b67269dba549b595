//! Levenshtein edit distance.
//!
//! Distances are computed over Unicode scalar values, so multi-byte
//! characters count as a single edit.

use std::cmp::min;

/// Calculate the Levenshtein distance between two strings.
///
/// This is the minimum number of single-character edits (insertions, deletions,
/// or substitutions) required to change one word into another.
#[allow(clippy::needless_range_loop)]
pub fn edit_distance(s1: &str, s2: &str) -> usize {
    let s1_chars: Vec<char> = s1.chars().collect();
    let s2_chars: Vec<char> = s2.chars().collect();
    let len1 = s1_chars.len();
    let len2 = s2_chars.len();

    if len1 == 0 {
        return len2;
    }
    if len2 == 0 {
        return len1;
    }

    let mut matrix = vec![vec![0; len2 + 1]; len1 + 1];

    for i in 0..=len1 {
        matrix[i][0] = i;
    }
    for j in 0..=len2 {
        matrix[0][j] = j;
    }

    for i in 1..=len1 {
        for j in 1..=len2 {
            matrix[i][j] = if s1_chars[i - 1] == s2_chars[j - 1] {
                matrix[i - 1][j - 1]
            } else {
                1 + min(
                    min(
                        matrix[i - 1][j], // deletion
                        matrix[i][j - 1], // insertion
                    ),
                    matrix[i - 1][j - 1], // substitution
                )
            };
        }
    }

    matrix[len1][len2]
}

/// Calculate the Levenshtein distance, giving up once it exceeds `threshold`.
///
/// Returns `None` if the distance is larger than the threshold. Only two rows of
/// the table are kept, and the scan stops as soon as every cell in a row is
/// already past the threshold.
#[allow(clippy::needless_range_loop)]
pub fn edit_distance_threshold(s1: &str, s2: &str, threshold: usize) -> Option<usize> {
    let s1_chars: Vec<char> = s1.chars().collect();
    let s2_chars: Vec<char> = s2.chars().collect();
    let len1 = s1_chars.len();
    let len2 = s2_chars.len();

    if len1.abs_diff(len2) > threshold {
        return None;
    }

    if len1 == 0 {
        return Some(len2);
    }
    if len2 == 0 {
        return Some(len1);
    }

    let mut prev_row: Vec<usize> = (0..=len2).collect();
    let mut curr_row = vec![0; len2 + 1];

    for i in 1..=len1 {
        curr_row[0] = i;
        let mut min_in_row = i;

        for j in 1..=len2 {
            curr_row[j] = if s1_chars[i - 1] == s2_chars[j - 1] {
                prev_row[j - 1]
            } else {
                1 + min(min(prev_row[j], curr_row[j - 1]), prev_row[j - 1])
            };

            min_in_row = min(min_in_row, curr_row[j]);
        }

        if min_in_row > threshold {
            return None;
        }

        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    let distance = prev_row[len2];
    if distance <= threshold {
        Some(distance)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_distance() {
        assert_eq!(edit_distance("", ""), 0);
        assert_eq!(edit_distance("abc", ""), 3);
        assert_eq!(edit_distance("", "abc"), 3);
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("test", "taste"), 2);
        assert_eq!(edit_distance("test", "tes"), 1);
    }

    #[test]
    fn test_distance_buckets_around_word() {
        let cases: [&[&str]; 3] = [
            &["10"],
            &["0", "1", "00", "11", "010", "100", "101", "110"],
            &["", "01", "000", "001", "011", "111"],
        ];

        for (dist, words) in cases.iter().enumerate() {
            for word in words.iter() {
                assert_eq!(edit_distance(word, "10"), dist, "word {word:?}");
            }
        }
    }

    #[test]
    fn test_identity_and_symmetry() {
        let words = ["", "a", "potato", "tomato", "\u{3042}\u{3044}", "taste"];
        for a in words {
            assert_eq!(edit_distance(a, a), 0);
            for b in words {
                assert_eq!(edit_distance(a, b), edit_distance(b, a));
            }
        }
    }

    #[test]
    fn test_multibyte_characters() {
        // One substitution, even though each character is three bytes in UTF-8.
        assert_eq!(edit_distance("\u{3042}\u{3044}", "\u{3042}\u{3046}"), 1);
        assert_eq!(edit_distance("caf\u{e9}", "cafe"), 1);
    }

    #[test]
    fn test_edit_distance_threshold() {
        assert_eq!(edit_distance_threshold("test", "taste", 2), Some(2));
        assert_eq!(edit_distance_threshold("test", "taste", 1), None);
        assert_eq!(edit_distance_threshold("a", "abc", 1), None);
        assert_eq!(edit_distance_threshold("a", "ab", 1), Some(1));
        assert_eq!(edit_distance_threshold("", "ab", 2), Some(2));
        assert_eq!(edit_distance_threshold("same", "same", 0), Some(0));
    }

    #[test]
    fn test_threshold_agrees_with_full_distance() {
        let words = ["0", "1", "01", "10", "0110", "1111", "potato", "otato", "tomato"];
        for a in words {
            for b in words {
                let full = edit_distance(a, b);
                for k in 0..4 {
                    let expected = if full <= k { Some(full) } else { None };
                    assert_eq!(edit_distance_threshold(a, b, k), expected, "{a} {b} {k}");
                }
            }
        }
    }
}
