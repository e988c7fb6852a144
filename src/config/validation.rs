use crate::config::types::{
    ApiConfig, Config, CredentialsConfig, SearchConsoleConfig, SitemapConfig, StoreConfig,
};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_credentials_config(&config.credentials)?;
    validate_sitemap_config(&config.sitemap)?;
    validate_search_console_config(&config.search_console)?;
    validate_store_config(&config.store)?;
    validate_api_config(&config.api)?;
    Ok(())
}

fn validate_credentials_config(config: &CredentialsConfig) -> Result<(), ConfigError> {
    if config.service_account_path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "service_account_path cannot be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_sitemap_config(config: &SitemapConfig) -> Result<(), ConfigError> {
    validate_http_url("sitemap url", &config.url)
}

/// Validates the Search Console property and locale
///
/// Two property shapes exist: domain properties (`sc-domain:example.com`) and
/// URL-prefix properties (`https://example.com/`).
fn validate_search_console_config(config: &SearchConsoleConfig) -> Result<(), ConfigError> {
    validate_property(&config.property)?;

    if config.language_code.trim().is_empty() {
        return Err(ConfigError::Validation(
            "language_code cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_store_config(config: &StoreConfig) -> Result<(), ConfigError> {
    if config.path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "store path cannot be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_api_config(config: &ApiConfig) -> Result<(), ConfigError> {
    validate_http_url("inspection_endpoint", &config.inspection_endpoint)?;
    validate_http_url("indexing_endpoint", &config.indexing_endpoint)?;
    Ok(())
}

fn validate_property(property: &str) -> Result<(), ConfigError> {
    if property.is_empty() {
        return Err(ConfigError::Validation(
            "property cannot be empty".to_string(),
        ));
    }

    if let Some(domain) = property.strip_prefix("sc-domain:") {
        return validate_domain_string(domain);
    }

    if property.starts_with("http://") || property.starts_with("https://") {
        return validate_http_url("property", property);
    }

    Err(ConfigError::Validation(format!(
        "property must be 'sc-domain:<domain>' or a URL prefix, got '{}'",
        property
    )))
}

fn validate_http_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", field, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "{} '{}' must use http or https",
            field, value
        )));
    }

    Ok(())
}

/// Validates a bare domain name
fn validate_domain_string(domain: &str) -> Result<(), ConfigError> {
    if domain.is_empty() {
        return Err(ConfigError::Validation(
            "Domain cannot be empty".to_string(),
        ));
    }

    if !domain
        .chars()
        .all(|c| c.is_alphanumeric() || c == '.' || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "Domain '{}' contains invalid characters",
            domain
        )));
    }

    if domain.starts_with('.')
        || domain.ends_with('.')
        || domain.starts_with('-')
        || domain.ends_with('-')
    {
        return Err(ConfigError::Validation(format!(
            "Domain '{}' cannot start or end with '.' or '-'",
            domain
        )));
    }

    if domain.contains("..") {
        return Err(ConfigError::Validation(format!(
            "Domain '{}' cannot contain consecutive dots",
            domain
        )));
    }

    if !domain.contains('.') {
        return Err(ConfigError::Validation(format!(
            "Domain '{}' must contain at least one dot (e.g., 'example.com')",
            domain
        )));
    }

    Ok(())
}
