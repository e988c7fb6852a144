//! Store traits and error types
//!
//! This module defines the trait interface for processed-URL store backends
//! and associated error types.

use std::collections::HashSet;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read processed URLs from {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write processed URLs to {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Set of URLs already handled by earlier runs
pub type ProcessedSet = HashSet<String>;

/// Trait for processed-URL store implementations
///
/// The store is read once at the start of a run and written back wholesale at
/// the end. Implementations assume a single process and a single writer.
pub trait UrlStore {
    /// Loads the processed set
    ///
    /// A store that has never been written yields an empty set; only genuine
    /// I/O failures are errors.
    fn load(&self) -> StoreResult<ProcessedSet>;

    /// Replaces the stored set with `urls`
    ///
    /// Order on the medium is unspecified.
    fn save(&self, urls: &ProcessedSet) -> StoreResult<()>;
}
