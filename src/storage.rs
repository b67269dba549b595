//! Key-value storage abstraction for the FastSS index.
//!
//! The index never talks to a database directly. It drives a [`KeyValueStore`],
//! a plain byte-key to byte-value map, so the same index code runs over an
//! in-memory map in tests and a persistent file in production.
//!
//! # Architecture
//!
//! - **KeyValueStore trait**: Unified interface for all storage backends
//! - **OpenMode**: How a backend treats an existing or missing location
//! - **StoreConfig enum**: Type-safe configuration for supported backends
//! - **StoreFactory**: Helper for constructing concrete store instances
//!
//! # Store Types
//!
//! ## FileStore
//! - Single-file persistent storage backed by `redb`
//! - Batched writes are committed in one transaction
//!
//! ## MemoryStore
//! - In-memory storage for testing and temporary indexes
//! - Fast but non-persistent
//!
//! # Concurrency
//!
//! Stores are `Send` but not shared: every mutation takes `&mut self`. Hosts
//! that let several threads or processes touch the same location must
//! serialize access themselves, since `add` and `remove` are read-modify-write
//! cycles over many keys.
//!
//! # Example
//!
//! ```
//! use fastss::storage::{OpenMode, StoreConfig, StoreFactory};
//! use fastss::storage::memory::MemoryStoreConfig;
//!
//! # fn main() -> fastss::error::Result<()> {
//! let mut store = StoreFactory::open(StoreConfig::Memory(MemoryStoreConfig::default()))?;
//! store.set(b"key", b"value")?;
//! assert_eq!(store.get(b"key")?, Some(b"value".to_vec()));
//! assert_eq!(store.mode(), OpenMode::ReadWriteCreate);
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{FastssError, Result};

pub mod file;
pub mod memory;

/// How a store treats its location when opened.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OpenMode {
    /// Open an existing store for reading only (`r`).
    ReadOnly,
    /// Open for reading and writing, creating the store if missing (`c`).
    #[default]
    ReadWriteCreate,
    /// Open an existing store for reading and writing (`w`).
    ReadWrite,
    /// Always create a new, empty store, discarding any existing one (`n`).
    CreateNew,
}

impl OpenMode {
    /// Whether writes are permitted in this mode.
    pub fn is_writable(self) -> bool {
        !matches!(self, OpenMode::ReadOnly)
    }

    /// Whether the location must already exist.
    pub fn requires_existing(self) -> bool {
        matches!(self, OpenMode::ReadOnly | OpenMode::ReadWrite)
    }

    /// The single-letter flag for this mode.
    pub fn flag(self) -> char {
        match self {
            OpenMode::ReadOnly => 'r',
            OpenMode::ReadWriteCreate => 'c',
            OpenMode::ReadWrite => 'w',
            OpenMode::CreateNew => 'n',
        }
    }
}

impl fmt::Display for OpenMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.flag())
    }
}

impl FromStr for OpenMode {
    type Err = FastssError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "r" => Ok(OpenMode::ReadOnly),
            "c" => Ok(OpenMode::ReadWriteCreate),
            "w" => Ok(OpenMode::ReadWrite),
            "n" => Ok(OpenMode::CreateNew),
            other => Err(FastssError::invalid_argument(format!(
                "unknown open mode {other:?} (expected one of r, c, w, n)"
            ))),
        }
    }
}

/// A single pending write in a [`WriteBatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOp {
    /// Store `value` under `key`, replacing any previous value.
    Put { key: Vec<u8>, value: Vec<u8> },
    /// Remove `key` if present.
    Delete { key: Vec<u8> },
}

/// An ordered group of writes applied together.
///
/// Backends that support transactions commit a batch atomically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteBatch {
    ops: Vec<WriteOp>,
}

impl WriteBatch {
    /// Create an empty batch.
    pub fn new() -> Self {
        WriteBatch::default()
    }

    /// Queue a put.
    pub fn put(&mut self, key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) {
        self.ops.push(WriteOp::Put {
            key: key.into(),
            value: value.into(),
        });
    }

    /// Queue a delete.
    pub fn delete(&mut self, key: impl Into<Vec<u8>>) {
        self.ops.push(WriteOp::Delete { key: key.into() });
    }

    /// Number of queued writes.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Whether the batch has no writes.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

impl IntoIterator for WriteBatch {
    type Item = WriteOp;
    type IntoIter = std::vec::IntoIter<WriteOp>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.into_iter()
    }
}

/// A byte-key to byte-value map that backs an index.
///
/// Implementations must reject writes when opened with [`OpenMode::ReadOnly`]
/// and reject every call after [`close`](KeyValueStore::close).
pub trait KeyValueStore: Send + fmt::Debug {
    /// The mode the store was opened with.
    fn mode(&self) -> OpenMode;

    /// Check whether a key is present.
    fn contains(&self, key: &[u8]) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }

    /// Fetch the value stored under `key`.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>>;

    /// Store `value` under `key`.
    fn set(&mut self, key: &[u8], value: &[u8]) -> Result<()>;

    /// Remove `key`. Removing an absent key is not an error.
    fn delete(&mut self, key: &[u8]) -> Result<()>;

    /// Apply a batch of writes.
    ///
    /// The default applies each write in turn; transactional backends override
    /// this to commit the whole batch at once.
    fn write_batch(&mut self, batch: WriteBatch) -> Result<()> {
        for op in batch {
            match op {
                WriteOp::Put { key, value } => self.set(&key, &value)?,
                WriteOp::Delete { key } => self.delete(&key)?,
            }
        }
        Ok(())
    }

    /// Number of keys in the store.
    fn len(&self) -> Result<usize>;

    /// Whether the store holds no keys.
    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Flush pending writes to durable storage.
    fn sync(&mut self) -> Result<()>;

    /// Close the store and release its resources.
    fn close(&mut self) -> Result<()>;
}

impl KeyValueStore for Box<dyn KeyValueStore> {
    fn mode(&self) -> OpenMode {
        self.as_ref().mode()
    }

    fn contains(&self, key: &[u8]) -> Result<bool> {
        self.as_ref().contains(key)
    }

    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        self.as_ref().get(key)
    }

    fn set(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        self.as_mut().set(key, value)
    }

    fn delete(&mut self, key: &[u8]) -> Result<()> {
        self.as_mut().delete(key)
    }

    fn write_batch(&mut self, batch: WriteBatch) -> Result<()> {
        self.as_mut().write_batch(batch)
    }

    fn len(&self) -> Result<usize> {
        self.as_ref().len()
    }

    fn sync(&mut self) -> Result<()> {
        self.as_mut().sync()
    }

    fn close(&mut self) -> Result<()> {
        self.as_mut().close()
    }
}

/// Configuration for storage backends.
///
/// Each variant carries the settings of one backend, including the path for
/// file-based storage.
#[derive(Debug, Clone)]
pub enum StoreConfig {
    /// File-based storage configuration (includes path)
    File(file::FileStoreConfig),

    /// Memory-based storage configuration
    Memory(memory::MemoryStoreConfig),
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::Memory(memory::MemoryStoreConfig::default())
    }
}

/// A factory for creating store instances.
pub struct StoreFactory;

impl StoreFactory {
    /// Open a store with the given configuration.
    pub fn open(config: StoreConfig) -> Result<Box<dyn KeyValueStore>> {
        match config {
            StoreConfig::Memory(mem_config) => Ok(Box::new(memory::MemoryStore::new(mem_config))),
            StoreConfig::File(file_config) => Ok(Box::new(file::FileStore::open(file_config)?)),
        }
    }
}

/// Error types specific to storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The store location does not exist.
    #[error("Store not found: {}", .0.display())]
    NotFound(PathBuf),

    /// A write was attempted on a read-only store.
    #[error("Store is read-only")]
    ReadOnly,

    /// The store was already closed.
    #[error("Store is closed")]
    StoreClosed,

    /// The underlying database reported an error.
    #[error("Database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<StorageError> for FastssError {
    fn from(err: StorageError) -> Self {
        FastssError::storage(err.to_string())
    }
}
