//! Sitemap-Indexer: keeps a site's sitemap in step with Google's index
//!
//! This crate reads the URLs declared in an XML sitemap, asks the Search Console
//! URL Inspection API whether each one is indexed, requests indexing through the
//! Indexing API for those that are not, and remembers every URL it has handled
//! so later runs only look at new entries.

pub mod config;
pub mod google;
pub mod http;
pub mod sitemap;
pub mod state;
pub mod store;
pub mod sync;

use thiserror::Error;

/// Main error type for Sitemap-Indexer operations
///
/// Every variant here is fatal for a run. Per-URL failures never surface as an
/// `IndexerError`; they are folded into [`state::UrlOutcome`] values instead.
#[derive(Debug, Error)]
pub enum IndexerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] store::StoreError),

    #[error("Sitemap error: {0}")]
    Sitemap(#[from] sitemap::SitemapError),

    #[error("Authentication error: {0}")]
    Auth(#[from] google::AuthError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Sitemap-Indexer operations
pub type Result<T> = std::result::Result<T, IndexerError>;

// Re-export commonly used types
pub use config::Config;
pub use state::{Classification, SubmitOutcome, UrlOutcome};
pub use sync::{Coordinator, SyncReport};
