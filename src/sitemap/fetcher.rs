//! Sitemap retrieval over HTTP

use crate::sitemap::parser::parse_sitemap_bytes;
use crate::sitemap::{SitemapError, SitemapSource};
use async_trait::async_trait;
use reqwest::Client;

/// Sitemap source that fetches the document with a shared HTTP client
#[derive(Debug, Clone)]
pub struct HttpSitemapSource {
    client: Client,
}

impl HttpSitemapSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SitemapSource for HttpSitemapSource {
    async fn fetch(&self, sitemap_url: &str) -> Result<Vec<String>, SitemapError> {
        fetch_sitemap(&self.client, sitemap_url).await
    }
}

/// Fetches a sitemap and returns its location URLs in document order
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `sitemap_url` - Address of the XML sitemap
///
/// # Returns
///
/// * `Ok(Vec<String>)` - The declared URLs (possibly empty)
/// * `Err(SitemapError::Fetch)` - The server answered with a non-success status
/// * `Err(SitemapError::Transport)` - The request could not be completed
/// * `Err(SitemapError::Parse)` - The body is not well-formed UTF-8 XML
pub async fn fetch_sitemap(client: &Client, sitemap_url: &str) -> Result<Vec<String>, SitemapError> {
    tracing::info!("Retrieving URLs from sitemap: {}", sitemap_url);

    let response = client
        .get(sitemap_url)
        .send()
        .await
        .map_err(|source| SitemapError::Transport {
            url: sitemap_url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(SitemapError::Fetch {
            url: sitemap_url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response
        .bytes()
        .await
        .map_err(|source| SitemapError::Transport {
            url: sitemap_url.to_string(),
            source,
        })?;

    let urls = parse_sitemap_bytes(&body)?;
    tracing::info!("Number of URLs found in the sitemap: {}", urls.len());
    Ok(urls)
}
