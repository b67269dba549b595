//! Binary encoding of posting sets and index metadata.
//!
//! A posting set is stored as its words in ascending order, UTF-8 encoded and
//! joined by a single NUL byte:
//!
//! ```text
//! {"a", "b", "c"}  =>  61 00 62 00 63
//! {}               =>  (empty)
//! ```
//!
//! Sorting makes the encoding deterministic, so equal sets always produce equal
//! bytes. The empty byte string decodes to the empty set.

use std::collections::BTreeSet;

use crate::error::{FastssError, Result};

/// Separator between words in an encoded posting set.
pub const DELIMITER: u8 = 0x00;

/// Encode a set of words.
///
/// Fails if a word contains the delimiter, since it could not be decoded back.
pub fn encode_word_set<'a, I>(words: I) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = &'a String>,
{
    let sorted: BTreeSet<&String> = words.into_iter().collect();

    let mut bytes = Vec::with_capacity(sorted.iter().map(|w| w.len() + 1).sum());
    for (i, word) in sorted.into_iter().enumerate() {
        if word.as_bytes().contains(&DELIMITER) {
            return Err(FastssError::encoding(format!(
                "word {word:?} contains the NUL delimiter"
            )));
        }
        if i > 0 {
            bytes.push(DELIMITER);
        }
        bytes.extend_from_slice(word.as_bytes());
    }

    Ok(bytes)
}

/// Decode a posting set produced by [`encode_word_set`].
pub fn decode_word_set(bytes: &[u8]) -> Result<BTreeSet<String>> {
    if bytes.is_empty() {
        return Ok(BTreeSet::new());
    }

    bytes
        .split(|b| *b == DELIMITER)
        .map(|chunk| {
            std::str::from_utf8(chunk)
                .map(str::to_string)
                .map_err(|e| FastssError::encoding(format!("invalid UTF-8 in posting: {e}")))
        })
        .collect()
}

/// Encode the maximum edit distance stored as index metadata.
pub fn encode_max_distance(max_distance: u8) -> [u8; 1] {
    [max_distance]
}

/// Decode the maximum edit distance metadata entry.
///
/// The entry must be exactly one byte; anything else means the metadata is corrupt.
pub fn decode_max_distance(bytes: &[u8]) -> Result<u8> {
    match bytes {
        [value] => Ok(*value),
        _ => Err(FastssError::storage(format!(
            "corrupt metadata: expected 1 byte for max distance, found {}",
            bytes.len()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(words: &[&str]) -> BTreeSet<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_encode_word_set() {
        assert_eq!(encode_word_set(&set(&[])).unwrap(), b"");
        assert_eq!(encode_word_set(&set(&["a", "b", "c"])).unwrap(), b"a\x00b\x00c");
        assert_eq!(
            encode_word_set(&set(&["\u{3042}", "\u{3043}"])).unwrap(),
            b"\xe3\x81\x82\x00\xe3\x81\x83"
        );
    }

    #[test]
    fn test_encoding_is_sorted() {
        let words = vec!["c".to_string(), "a".to_string(), "b".to_string()];
        assert_eq!(encode_word_set(&words).unwrap(), b"a\x00b\x00c");
    }

    #[test]
    fn test_decode_word_set() {
        assert_eq!(decode_word_set(b"").unwrap(), set(&[]));
        assert_eq!(decode_word_set(b"a\x00b\x00c").unwrap(), set(&["a", "b", "c"]));
        assert_eq!(
            decode_word_set(b"\xe3\x81\x82\x00\xe3\x81\x83").unwrap(),
            set(&["\u{3042}", "\u{3043}"])
        );
    }

    #[test]
    fn test_empty_word_inside_larger_set() {
        let words = set(&["", "a"]);
        let bytes = encode_word_set(&words).unwrap();
        assert_eq!(bytes, b"\x00a");
        assert_eq!(decode_word_set(&bytes).unwrap(), words);
    }

    #[test]
    fn test_rejects_delimiter_in_word() {
        let result = encode_word_set(&set(&["a\0b"]));
        assert!(matches!(result, Err(FastssError::Encoding(_))));
    }

    #[test]
    fn test_rejects_invalid_utf8() {
        let result = decode_word_set(b"ok\x00\xff\xfe");
        assert!(matches!(result, Err(FastssError::Encoding(_))));
    }

    #[test]
    fn test_max_distance() {
        assert_eq!(encode_max_distance(0), [0x00]);
        assert_eq!(encode_max_distance(16), [0x10]);
        assert_eq!(encode_max_distance(255), [0xff]);

        assert_eq!(decode_max_distance(b"\x00").unwrap(), 0);
        assert_eq!(decode_max_distance(b"\x01").unwrap(), 1);
        assert_eq!(decode_max_distance(b"\xff").unwrap(), 255);

        assert!(matches!(decode_max_distance(b""), Err(FastssError::Storage(_))));
        assert!(matches!(decode_max_distance(b"\x01\x02"), Err(FastssError::Storage(_))));
    }
}
