//! In-memory storage implementation for testing and temporary indexes.

use std::collections::{BTreeMap, HashMap};

use crate::error::Result;
use crate::storage::{KeyValueStore, OpenMode, StorageError};

/// Configuration specific to memory-based storage.
#[derive(Debug, Clone)]
pub struct MemoryStoreConfig {
    /// Initial capacity for the key map.
    pub initial_capacity: usize,

    /// Open mode. Only [`OpenMode::ReadOnly`] changes behavior, since a
    /// fresh memory store never has existing contents to keep or discard.
    pub mode: OpenMode,
}

impl Default for MemoryStoreConfig {
    fn default() -> Self {
        MemoryStoreConfig {
            initial_capacity: 16,
            mode: OpenMode::ReadWriteCreate,
        }
    }
}

/// An in-memory key-value store.
#[derive(Debug)]
pub struct MemoryStore {
    entries: HashMap<Vec<u8>, Vec<u8>>,
    mode: OpenMode,
    closed: bool,
}

impl MemoryStore {
    /// Create a new memory store.
    pub fn new(config: MemoryStoreConfig) -> Self {
        MemoryStore {
            entries: HashMap::with_capacity(config.initial_capacity),
            mode: config.mode,
            closed: false,
        }
    }

    /// Create a new writable memory store with default configuration.
    pub fn new_default() -> Self {
        Self::new(MemoryStoreConfig::default())
    }

    /// Reopen this store's contents under a different mode.
    pub fn reopen(self, mode: OpenMode) -> Self {
        let entries = if mode == OpenMode::CreateNew {
            HashMap::new()
        } else {
            self.entries
        };

        MemoryStore {
            entries,
            mode,
            closed: false,
        }
    }

    /// A sorted copy of every entry, for inspection in tests and dumps.
    pub fn snapshot(&self) -> BTreeMap<Vec<u8>, Vec<u8>> {
        self.entries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    fn check_closed(&self) -> Result<()> {
        if self.closed {
            Err(StorageError::StoreClosed.into())
        } else {
            Ok(())
        }
    }

    fn check_writable(&self) -> Result<()> {
        self.check_closed()?;
        if self.mode.is_writable() {
            Ok(())
        } else {
            Err(StorageError::ReadOnly.into())
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new_default()
    }
}

impl KeyValueStore for MemoryStore {
    fn mode(&self) -> OpenMode {
        self.mode
    }

    fn contains(&self, key: &[u8]) -> Result<bool> {
        self.check_closed()?;
        Ok(self.entries.contains_key(key))
    }

    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        self.check_closed()?;
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        self.check_writable()?;
        self.entries.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> Result<()> {
        self.check_writable()?;
        self.entries.remove(key);
        Ok(())
    }

    fn len(&self) -> Result<usize> {
        self.check_closed()?;
        Ok(self.entries.len())
    }

    fn sync(&mut self) -> Result<()> {
        self.check_closed()
    }

    fn close(&mut self) -> Result<()> {
        self.closed = true;
        Ok(())
    }
}
