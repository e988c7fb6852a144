use serde::Deserialize;

/// Default locale sent with every URL inspection request
pub const DEFAULT_LANGUAGE_CODE: &str = "fr-FR";

/// Default URL Inspection API endpoint
pub const DEFAULT_INSPECTION_ENDPOINT: &str =
    "https://searchconsole.googleapis.com/v1/urlInspection/index:inspect";

/// Default Indexing API publish endpoint
pub const DEFAULT_INDEXING_ENDPOINT: &str =
    "https://indexing.googleapis.com/v3/urlNotifications:publish";

/// Main configuration structure for Sitemap-Indexer
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub credentials: CredentialsConfig,
    pub sitemap: SitemapConfig,
    #[serde(rename = "search-console")]
    pub search_console: SearchConsoleConfig,
    pub store: StoreConfig,
    #[serde(default)]
    pub indexing: IndexingConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

/// Service-account credentials
#[derive(Debug, Clone, Deserialize)]
pub struct CredentialsConfig {
    /// Path to the service-account JSON key file
    #[serde(rename = "service-account-path")]
    pub service_account_path: String,
}

/// Sitemap source
#[derive(Debug, Clone, Deserialize)]
pub struct SitemapConfig {
    /// Address of the XML sitemap
    pub url: String,
}

/// Search Console property settings
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConsoleConfig {
    /// Property identifier (e.g., "sc-domain:example.com" or "https://example.com/")
    pub property: String,

    /// Locale used for inspection results
    #[serde(rename = "language-code", default = "default_language_code")]
    pub language_code: String,
}

/// Processed-URL store settings
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Path to the flat text file of processed URLs
    pub path: String,
}

/// Indexing request behavior
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IndexingConfig {
    /// What to do with a URL whose indexing request failed for a non-quota reason
    #[serde(rename = "on-error", default)]
    pub on_error: ErrorPolicy,
}

/// Policy for non-quota indexing failures
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Mark the URL processed anyway; it will not be retried
    #[default]
    Drop,

    /// Leave the URL unprocessed so the next run tries again
    Retry,
}

/// Remote endpoint overrides
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(rename = "inspection-endpoint", default = "default_inspection_endpoint")]
    pub inspection_endpoint: String,

    #[serde(rename = "indexing-endpoint", default = "default_indexing_endpoint")]
    pub indexing_endpoint: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            inspection_endpoint: default_inspection_endpoint(),
            indexing_endpoint: default_indexing_endpoint(),
        }
    }
}

fn default_language_code() -> String {
    DEFAULT_LANGUAGE_CODE.to_string()
}

fn default_inspection_endpoint() -> String {
    DEFAULT_INSPECTION_ENDPOINT.to_string()
}

fn default_indexing_endpoint() -> String {
    DEFAULT_INDEXING_ENDPOINT.to_string()
}
