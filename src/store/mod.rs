//! Store module for the processed-URL set
//!
//! This module persists the set of URLs that earlier runs have already
//! handled, so each run only inspects URLs it has not seen before.

mod file;
mod traits;

pub use file::FileStore;
pub use traits::{ProcessedSet, StoreError, StoreResult, UrlStore};

use std::path::Path;

/// Opens the file-backed store at `path`
pub fn open_store(path: &Path) -> FileStore {
    FileStore::new(path)
}
