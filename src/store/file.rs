//! Flat text file store
//!
//! One URL per line, UTF-8, no header. Blank lines and surrounding whitespace
//! are ignored when reading. Saves go through a temporary file in the same
//! directory that is renamed over the original, so an interrupted save leaves
//! the previous set intact.

use crate::store::traits::{ProcessedSet, StoreError, StoreResult, UrlStore};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Processed-URL store backed by a plain text file
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Creates a store for the file at `path`
    ///
    /// The file is not touched until [`UrlStore::load`] or [`UrlStore::save`]
    /// is called.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_atomically(&self, content: &[u8]) -> std::io::Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(content)?;
        file.as_file().sync_all()?;
        file.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl UrlStore for FileStore {
    fn load(&self) -> StoreResult<ProcessedSet> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(
                    "No processed URL file at {}, starting empty",
                    self.path.display()
                );
                return Ok(ProcessedSet::new());
            }
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        Ok(parse_lines(&content))
    }

    fn save(&self, urls: &ProcessedSet) -> StoreResult<()> {
        let mut content = String::with_capacity(urls.iter().map(|u| u.len() + 1).sum());
        for url in urls {
            content.push_str(url);
            content.push('\n');
        }

        self.write_atomically(content.as_bytes())
            .map_err(|source| StoreError::Write {
                path: self.path.clone(),
                source,
            })?;

        tracing::debug!(
            "Saved {} processed URLs to {}",
            urls.len(),
            self.path.display()
        );
        Ok(())
    }
}

fn parse_lines(content: &str) -> ProcessedSet {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
