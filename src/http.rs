//! Shared HTTP client construction

use reqwest::Client;

/// User agent sent with every request
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Builds the HTTP client shared by the sitemap reader and the API clients
///
/// No request timeout is configured; calls wait for the transport's own limits.
///
/// # Example
///
/// ```no_run
/// use sitemap_indexer::http::build_http_client;
///
/// let client = build_http_client().unwrap();
/// ```
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .gzip(true)
        .brotli(true)
        .build()
}
