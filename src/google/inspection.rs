//! URL Inspection API client
//!
//! Answers whether a URL is in Google's index. Failures never propagate: the
//! caller gets `Classification::Unknown` and the cause is logged.

use crate::google::request::post_json;
use crate::google::{ApiError, GoogleAuth, StatusChecker};
use crate::state::Classification;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Request body for `urlInspection/index:inspect`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectUrlRequest<'a> {
    pub inspection_url: &'a str,
    pub site_url: &'a str,
    pub language_code: &'a str,
}

/// Response body for `urlInspection/index:inspect`
///
/// Only the parts needed for classification are modelled; every level is
/// optional because the API omits empty sections.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectUrlResponse {
    #[serde(default)]
    pub inspection_result: Option<InspectionResult>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectionResult {
    #[serde(default)]
    pub inspection_result_link: Option<String>,
    #[serde(default)]
    pub index_status_result: Option<IndexStatusResult>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexStatusResult {
    #[serde(default)]
    pub coverage_state: Option<String>,
    #[serde(default)]
    pub verdict: Option<String>,
    #[serde(default)]
    pub last_crawl_time: Option<String>,
}

impl InspectUrlResponse {
    /// Returns the coverage state, if the response carries one
    pub fn coverage_state(&self) -> Option<&str> {
        self.inspection_result
            .as_ref()?
            .index_status_result
            .as_ref()?
            .coverage_state
            .as_deref()
    }

    pub fn classification(&self) -> Classification {
        Classification::from_coverage_state(self.coverage_state())
    }
}

/// Client for the Search Console URL Inspection API
#[derive(Debug, Clone)]
pub struct InspectionClient {
    client: Client,
    auth: Arc<GoogleAuth>,
    endpoint: String,
    language_code: String,
}

impl InspectionClient {
    pub fn new(
        client: Client,
        auth: Arc<GoogleAuth>,
        endpoint: impl Into<String>,
        language_code: impl Into<String>,
    ) -> Self {
        Self {
            client,
            auth,
            endpoint: endpoint.into(),
            language_code: language_code.into(),
        }
    }

    /// Performs the raw inspection call
    pub async fn inspect_url(
        &self,
        url: &str,
        site_property: &str,
    ) -> Result<InspectUrlResponse, ApiError> {
        let request = InspectUrlRequest {
            inspection_url: url,
            site_url: site_property,
            language_code: &self.language_code,
        };

        post_json(&self.client, &self.auth, &self.endpoint, &request).await
    }
}

#[async_trait]
impl StatusChecker for InspectionClient {
    async fn inspect(&self, url: &str, site_property: &str) -> Classification {
        match self.inspect_url(url, site_property).await {
            Ok(response) => {
                tracing::debug!(
                    "Coverage state for {}: {}",
                    url,
                    response.coverage_state().unwrap_or("UNSPECIFIED")
                );
                response.classification()
            }
            Err(e) => {
                tracing::warn!("Error checking index status for {}: {}", url, e);
                Classification::Unknown
            }
        }
    }
}
