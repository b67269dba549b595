//! # FastSS
//!
//! An approximate string matching index based on FastSS deletion neighborhoods.
//!
//! ## Features
//!
//! - Finds every indexed word within a bounded Levenshtein distance of a query
//!   without scanning the whole dictionary
//! - Incremental add and atomic-looking remove
//! - Pluggable key-value storage: in-memory or a single redb file
//! - Deterministic, language-independent on-disk posting format

pub mod cli;
pub mod codec;
pub mod distance;
pub mod error;
pub mod index;
pub mod storage;
pub mod variant;

pub mod prelude {
    pub use crate::error::{FastssError, Result};
    pub use crate::index::{FastSsIndex, IndexConfig, QueryResult};
    pub use crate::storage::file::{FileStore, FileStoreConfig};
    pub use crate::storage::memory::{MemoryStore, MemoryStoreConfig};
    pub use crate::storage::{KeyValueStore, OpenMode};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
