//! Single-file persistent storage backed by redb.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use redb::{ReadTransaction, ReadableDatabase, ReadableTable, TableDefinition, TableError};

use crate::error::Result;
use crate::storage::{KeyValueStore, OpenMode, StorageError, WriteBatch, WriteOp};

/// Table holding every entry: raw key bytes to raw value bytes.
const ENTRIES: TableDefinition<&[u8], &[u8]> = TableDefinition::new("entries");

/// Configuration specific to file-based storage.
#[derive(Debug, Clone)]
pub struct FileStoreConfig {
    /// Path of the database file.
    pub path: PathBuf,

    /// How to treat an existing or missing file.
    pub mode: OpenMode,

    /// Create missing parent directories when the mode may create the file.
    pub create_dirs: bool,
}

impl FileStoreConfig {
    /// Create a new file store configuration with the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        FileStoreConfig {
            path: path.as_ref().to_path_buf(),
            mode: OpenMode::ReadWriteCreate,
            create_dirs: true,
        }
    }

    /// Set the open mode.
    pub fn with_mode(mut self, mode: OpenMode) -> Self {
        self.mode = mode;
        self
    }
}

/// The open database. Read-only handles take a shared lock and never touch
/// the file, so any number of readers can hold one at once.
enum Handle {
    Writable(redb::Database),
    ReadOnly(redb::ReadOnlyDatabase),
}

/// A file-backed key-value store.
///
/// Dropping the store releases the database file; [`close`](KeyValueStore::close)
/// does the same explicitly.
pub struct FileStore {
    handle: Option<Handle>,
    path: PathBuf,
    mode: OpenMode,
}

impl fmt::Debug for FileStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileStore")
            .field("path", &self.path)
            .field("mode", &self.mode)
            .field("open", &self.handle.is_some())
            .finish()
    }
}

fn db_error<E: fmt::Display>(err: E) -> StorageError {
    StorageError::Database(err.to_string())
}

impl FileStore {
    /// Open or create the database file according to the configured mode.
    pub fn open(config: FileStoreConfig) -> Result<Self> {
        let FileStoreConfig {
            path,
            mode,
            create_dirs,
        } = config;

        if mode.requires_existing() && !path.exists() {
            return Err(StorageError::NotFound(path).into());
        }

        if mode == OpenMode::CreateNew && path.exists() {
            debug!("discarding existing store at {}", path.display());
            fs::remove_file(&path).map_err(StorageError::from)?;
        }

        if create_dirs && !mode.requires_existing() {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(StorageError::from)?;
            }
        }

        let handle = match mode {
            OpenMode::ReadOnly => {
                Handle::ReadOnly(redb::ReadOnlyDatabase::open(&path).map_err(db_error)?)
            }
            OpenMode::ReadWrite => {
                Handle::Writable(redb::Database::open(&path).map_err(db_error)?)
            }
            OpenMode::ReadWriteCreate | OpenMode::CreateNew => {
                Handle::Writable(redb::Database::create(&path).map_err(db_error)?)
            }
        };

        if let Handle::Writable(db) = &handle {
            let write_txn = db.begin_write().map_err(db_error)?;
            {
                let _ = write_txn.open_table(ENTRIES).map_err(db_error)?;
            }
            write_txn.commit().map_err(db_error)?;
        }

        debug!("opened store at {} (mode {})", path.display(), mode);

        Ok(FileStore {
            handle: Some(handle),
            path,
            mode,
        })
    }

    /// Path of the database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn handle(&self) -> Result<&Handle> {
        self.handle
            .as_ref()
            .ok_or_else(|| StorageError::StoreClosed.into())
    }

    fn begin_read(&self) -> Result<ReadTransaction> {
        let txn = match self.handle()? {
            Handle::Writable(db) => db.begin_read(),
            Handle::ReadOnly(db) => db.begin_read(),
        };
        Ok(txn.map_err(db_error)?)
    }

    fn writable_db(&self) -> Result<&redb::Database> {
        match self.handle()? {
            Handle::Writable(db) => Ok(db),
            Handle::ReadOnly(_) => Err(StorageError::ReadOnly.into()),
        }
    }
}

impl KeyValueStore for FileStore {
    fn mode(&self) -> OpenMode {
        self.mode
    }

    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        let read_txn = self.begin_read()?;
        let table = match read_txn.open_table(ENTRIES) {
            Ok(table) => table,
            // A file created by another writer may not have the table yet.
            Err(TableError::TableDoesNotExist(_)) => return Ok(None),
            Err(e) => return Err(db_error(e).into()),
        };

        let value = table
            .get(key)
            .map_err(db_error)?
            .map(|guard| guard.value().to_vec());
        Ok(value)
    }
    fn set(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        let mut batch = WriteBatch::new();
        batch.put(key, value);
        self.write_batch(batch)
    }

    fn delete(&mut self, key: &[u8]) -> Result<()> {
        let mut batch = WriteBatch::new();
        batch.delete(key);
        self.write_batch(batch)
    }

    fn write_batch(&mut self, batch: WriteBatch) -> Result<()> {
        let db = self.writable_db()?;
        if batch.is_empty() {
            return Ok(());
        }

        let write_txn = db.begin_write().map_err(db_error)?;
        {
            let mut table = write_txn.open_table(ENTRIES).map_err(db_error)?;
            for op in batch {
                match op {
                    WriteOp::Put { key, value } => {
                        table
                            .insert(key.as_slice(), value.as_slice())
                            .map_err(db_error)?;
                    }
                    WriteOp::Delete { key } => {
                        table.remove(key.as_slice()).map_err(db_error)?;
                    }
                }
            }
        }
        write_txn.commit().map_err(db_error)?;

        Ok(())
    }

    fn len(&self) -> Result<usize> {
        let read_txn = self.begin_read()?;
        let table = match read_txn.open_table(ENTRIES) {
            Ok(table) => table,
            Err(TableError::TableDoesNotExist(_)) => return Ok(0),
            Err(e) => return Err(db_error(e).into()),
        };

        let mut count = 0;
        for entry in table.iter().map_err(db_error)? {
            entry.map_err(db_error)?;
            count += 1;
        }
        Ok(count)
    }

    fn sync(&mut self) -> Result<()> {
        // Every write transaction is committed durably.
        self.handle().map(|_| ())
    }

    fn close(&mut self) -> Result<()> {
        if self.handle.take().is_some() {
            debug!("closed store at {}", self.path.display());
        }
        Ok(())
    }
}
