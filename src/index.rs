//! The FastSS approximate matching index.
//!
//! Every indexed word is stored under each of its deletion variants (see
//! [`crate::variant`]). A query expands the query word the same way, unions the
//! postings found under those keys into a candidate set, and then verifies each
//! candidate with a real edit distance computation, so key collisions never
//! leak into the result.
//!
//! # Storage layout
//!
//! | key                          | value                                   |
//! |------------------------------|-----------------------------------------|
//! | [`METADATA_KEY`]             | one byte: the maximum edit distance     |
//! | UTF-8 variant string         | posting set, see [`crate::codec`]       |
//!
//! The metadata key starts with `0xFF`, which never occurs in UTF-8, so it
//! cannot collide with a variant key.
//!
//! # Example
//!
//! ```
//! use fastss::index::{FastSsIndex, IndexConfig};
//! use fastss::storage::memory::MemoryStore;
//!
//! # fn main() -> fastss::error::Result<()> {
//! let mut index = FastSsIndex::open(MemoryStore::new_default(), IndexConfig::default())?;
//! index.add("test")?;
//!
//! let result = index.query("taste")?;
//! assert!(result.bucket(0).is_empty());
//! assert!(result.bucket(1).is_empty());
//! assert_eq!(result.bucket(2), ["test".to_string()]);
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeSet;
use std::path::Path;

use ahash::AHashSet;
use log::{debug, info};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::codec::{decode_max_distance, decode_word_set, encode_max_distance, encode_word_set};
use crate::distance::edit_distance_threshold;
use crate::error::{FastssError, Result};
use crate::storage::file::{FileStore, FileStoreConfig};
use crate::storage::{KeyValueStore, OpenMode, WriteBatch};
use crate::variant::variants;

/// Reserved key holding the index's maximum edit distance.
pub const METADATA_KEY: &[u8] = b"\xffmax_distance";

/// Maximum edit distance used when creating an index without explicit configuration.
pub const DEFAULT_MAX_DISTANCE: u8 = 2;

/// Configuration applied when an index is created.
///
/// An existing index keeps the settings it was created with; these values are
/// only written when the store has no metadata yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Largest edit distance the index answers queries for.
    pub max_distance: u8,
}

impl IndexConfig {
    /// Create a configuration with the given maximum distance.
    pub fn new(max_distance: u8) -> Self {
        IndexConfig { max_distance }
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        IndexConfig {
            max_distance: DEFAULT_MAX_DISTANCE,
        }
    }
}

/// Words matching a query, grouped by exact edit distance.
///
/// There is one bucket for every distance from `0` to the index's maximum,
/// including empty ones. Words inside a bucket are sorted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResult {
    buckets: Vec<Vec<String>>,
}

impl QueryResult {
    fn new(max_distance: u8) -> Self {
        QueryResult {
            buckets: vec![Vec::new(); max_distance as usize + 1],
        }
    }

    /// Largest distance bucket in this result.
    pub fn max_distance(&self) -> usize {
        self.buckets.len() - 1
    }

    /// Words at exactly `distance` from the query. Out-of-range distances are empty.
    pub fn bucket(&self, distance: usize) -> &[String] {
        self.buckets
            .get(distance)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Iterate over `(distance, words)` pairs in increasing distance.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[String])> {
        self.buckets
            .iter()
            .enumerate()
            .map(|(distance, words)| (distance, words.as_slice()))
    }

    /// Total number of matched words.
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    /// Whether no word matched.
    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }

    /// Consume the result, returning the buckets indexed by distance.
    pub fn into_buckets(self) -> Vec<Vec<String>> {
        self.buckets
    }
}

impl Serialize for QueryResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.buckets.len()))?;
        for (distance, words) in self.iter() {
            map.serialize_entry(&distance.to_string(), words)?;
        }
        map.end()
    }
}

/// An approximate string matching index over a [`KeyValueStore`].
///
/// Mutations are read-modify-write cycles over many keys and are not safe to
/// run concurrently against one store; callers sharing a store must serialize
/// access.
#[derive(Debug)]
pub struct FastSsIndex<S: KeyValueStore> {
    store: S,
    max_distance: u8,
}

impl FastSsIndex<FileStore> {
    /// Open a file-backed index at `path`.
    ///
    /// `config` is only used when the file does not hold an index yet.
    pub fn open_path<P: AsRef<Path>>(path: P, mode: OpenMode, config: IndexConfig) -> Result<Self> {
        let store = FileStore::open(FileStoreConfig::new(path).with_mode(mode))?;
        Self::open(store, config)
    }
}

impl<S: KeyValueStore> FastSsIndex<S> {
    /// Open an index over `store`.
    ///
    /// If the store already carries index metadata, its maximum distance wins
    /// over `config`. Otherwise the configured distance is written immediately,
    /// which requires a writable store.
    pub fn open(mut store: S, config: IndexConfig) -> Result<Self> {
        let max_distance = match store.get(METADATA_KEY)? {
            Some(bytes) => {
                let stored = decode_max_distance(&bytes)?;
                if stored != config.max_distance {
                    debug!(
                        "using stored max distance {stored} instead of requested {}",
                        config.max_distance
                    );
                }
                stored
            }
            None if store.mode().is_writable() => {
                store.set(METADATA_KEY, &encode_max_distance(config.max_distance))?;
                info!("created index with max distance {}", config.max_distance);
                config.max_distance
            }
            None => {
                return Err(FastssError::storage(
                    "store has no index metadata and is opened read-only",
                ));
            }
        };

        Ok(FastSsIndex {
            store,
            max_distance,
        })
    }

    /// The maximum edit distance this index was created with.
    pub fn max_distance(&self) -> u8 {
        self.max_distance
    }

    /// Borrow the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Add a word. Adding a word that is already indexed changes nothing.
    pub fn add(&mut self, word: &str) -> Result<()> {
        validate_word(word)?;

        let mut batch = WriteBatch::new();
        for key in variants(word, self.max_distance as usize) {
            let mut postings = self.postings(key.as_bytes())?;
            if postings.insert(word.to_string()) {
                batch.put(key.into_bytes(), encode_word_set(&postings)?);
            }
        }

        if batch.is_empty() {
            debug!("{word:?} is already indexed");
            return Ok(());
        }

        debug!("indexing {word:?} under {} keys", batch.len());
        self.store.write_batch(batch)
    }

    /// Add every word from an iterator, returning how many were processed.
    pub fn add_all<I, W>(&mut self, words: I) -> Result<usize>
    where
        I: IntoIterator<Item = W>,
        W: AsRef<str>,
    {
        let mut count = 0;
        for word in words {
            self.add(word.as_ref())?;
            count += 1;
        }
        Ok(count)
    }

    /// Remove a word.
    ///
    /// Every posting the word should appear in is checked before anything is
    /// written. If any of them lacks the word, the store is left untouched and
    /// [`FastssError::NotFound`] is returned. Postings left empty are deleted.
    /// Words that [`add`](Self::add) would reject are never indexed, so they are
    /// reported as not found as well.
    pub fn remove(&mut self, word: &str) -> Result<()> {
        if validate_word(word).is_err() {
            return Err(FastssError::not_found(word));
        }

        let mut batch = WriteBatch::new();
        for key in variants(word, self.max_distance as usize) {
            let mut postings = self.postings(key.as_bytes())?;
            if !postings.remove(word) {
                debug!("{word:?} missing from posting {key:?}");
                return Err(FastssError::not_found(word));
            }

            if postings.is_empty() {
                batch.delete(key.into_bytes());
            } else {
                batch.put(key.into_bytes(), encode_word_set(&postings)?);
            }
        }

        debug!("removing {word:?} from {} keys", batch.len());
        self.store.write_batch(batch)
    }

    /// Find every indexed word within the maximum edit distance of `word`.
    pub fn query(&self, word: &str) -> Result<QueryResult> {
        let max_distance = self.max_distance as usize;

        let mut candidates = AHashSet::new();
        for key in variants(word, max_distance) {
            if let Some(bytes) = self.store.get(key.as_bytes())? {
                candidates.extend(decode_word_set(&bytes)?);
            }
        }

        let mut result = QueryResult::new(self.max_distance);
        let total = candidates.len();
        for candidate in candidates {
            if let Some(distance) = edit_distance_threshold(word, &candidate, max_distance) {
                result.buckets[distance].push(candidate);
            }
        }
        for bucket in &mut result.buckets {
            bucket.sort();
        }

        debug!(
            "query {word:?}: {} of {total} candidates within distance {max_distance}",
            result.len()
        );
        Ok(result)
    }

    /// Whether `word` itself is indexed.
    ///
    /// Only the posting stored under the word's own key is read.
    pub fn contains(&self, word: &str) -> Result<bool> {
        Ok(self.postings(word.as_bytes())?.contains(word))
    }

    /// Number of keys in the backing store, including the metadata entry.
    pub fn key_count(&self) -> Result<usize> {
        self.store.len()
    }

    /// Flush the backing store.
    pub fn sync(&mut self) -> Result<()> {
        self.store.sync()
    }

    /// Close the index, releasing the backing store.
    pub fn close(mut self) -> Result<()> {
        self.store.close()
    }

    /// Consume the index and hand back its store.
    pub fn into_store(self) -> S {
        self.store
    }

    fn postings(&self, key: &[u8]) -> Result<BTreeSet<String>> {
        match self.store.get(key)? {
            Some(bytes) => decode_word_set(&bytes),
            None => Ok(BTreeSet::new()),
        }
    }
}

/// Reject words that cannot round-trip through the posting codec.
fn validate_word(word: &str) -> Result<()> {
    if word.is_empty() {
        return Err(FastssError::invalid_argument("cannot index an empty word"));
    }
    if word.contains('\0') {
        return Err(FastssError::invalid_argument(format!(
            "word {word:?} contains a NUL character"
        )));
    }
    Ok(())
}
