//! Indexing API client
//!
//! Publishes `URL_UPDATED` notifications so Google recrawls a URL.

use crate::google::request::post_authorized;
use crate::google::{ApiError, GoogleAuth, IndexingRequester};
use crate::state::SubmitOutcome;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Notification type for new or changed content
pub const URL_UPDATED: &str = "URL_UPDATED";

/// Request body for `urlNotifications:publish`
#[derive(Debug, Clone, Serialize)]
pub struct PublishRequest<'a> {
    pub url: &'a str,
    #[serde(rename = "type")]
    pub notification_type: &'a str,
}

/// Response body for `urlNotifications:publish`
///
/// Logged for the operator; its contents do not affect control flow.
/// Decoded on a best-effort basis, see [`PublishResponse::from_body`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishResponse {
    #[serde(default)]
    pub url_notification_metadata: Option<UrlNotificationMetadata>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlNotificationMetadata {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub latest_update: Option<UrlNotification>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlNotification {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, rename = "type")]
    pub notification_type: Option<String>,
    #[serde(default)]
    pub notify_time: Option<String>,
}

impl PublishResponse {
    /// Decodes a success body, or `None` when it is empty or not the expected JSON
    pub fn from_body(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }
}

/// Client for the Indexing API
#[derive(Debug, Clone)]
pub struct IndexingClient {
    client: Client,
    auth: Arc<GoogleAuth>,
    endpoint: String,
}

impl IndexingClient {
    pub fn new(client: Client, auth: Arc<GoogleAuth>, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            auth,
            endpoint: endpoint.into(),
        }
    }

    /// Performs the raw publish call
    ///
    /// The HTTP status alone decides success. The reply body is returned as
    /// received.
    pub async fn publish(&self, url: &str) -> Result<String, ApiError> {
        let request = PublishRequest {
            url,
            notification_type: URL_UPDATED,
        };

        post_authorized(&self.client, &self.auth, &self.endpoint, &request).await
    }
}

#[async_trait]
impl IndexingRequester for IndexingClient {
    async fn request_indexing(&self, url: &str) -> SubmitOutcome {
        tracing::info!("Requesting indexing for: {}", url);

        match self.publish(url).await {
            Ok(body) => {
                match PublishResponse::from_body(&body) {
                    Some(response) => tracing::info!("Indexing API response: {:?}", response),
                    None => tracing::info!("Indexing API response: {:?}", body.trim()),
                }
                SubmitOutcome::Submitted
            }
            Err(e) => SubmitOutcome::from_error(e),
        }
    }
}
