//! Sitemap module
//!
//! This module fetches an XML sitemap and extracts the page URLs it declares.
//! Nested sitemap indexes are not followed.

mod fetcher;
mod parser;

pub use fetcher::{fetch_sitemap, HttpSitemapSource};
pub use parser::{parse_sitemap, parse_sitemap_bytes};

use async_trait::async_trait;
use thiserror::Error;

/// XML namespace of the sitemap protocol
pub const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Errors that can occur while reading a sitemap
#[derive(Debug, Error)]
pub enum SitemapError {
    #[error("Unable to retrieve sitemap {url}: HTTP status code {status}")]
    Fetch { url: String, status: u16 },

    #[error("Unable to retrieve sitemap {url}: {source}")]
    Transport {
        url: String,
        source: reqwest::Error,
    },

    #[error("Malformed sitemap XML: {0}")]
    Parse(String),
}

/// Source of the ordered URL list for a run
#[async_trait]
pub trait SitemapSource {
    /// Returns the URLs declared by the sitemap at `sitemap_url`, in document order
    async fn fetch(&self, sitemap_url: &str) -> Result<Vec<String>, SitemapError>;
}
