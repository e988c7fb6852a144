//! Configuration module for Sitemap-Indexer
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use sitemap_indexer::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Sitemap: {}", config.sitemap.url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    ApiConfig, Config, CredentialsConfig, ErrorPolicy, IndexingConfig, SearchConsoleConfig,
    SitemapConfig, StoreConfig, DEFAULT_INDEXING_ENDPOINT, DEFAULT_INSPECTION_ENDPOINT,
    DEFAULT_LANGUAGE_CODE,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
