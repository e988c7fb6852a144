//! Google API module
//!
//! This module talks to the two remote services the sync depends on:
//! - Search Console URL Inspection (is this URL indexed?)
//! - Indexing API (please recrawl this URL)
//!
//! Both authenticate with a service account through [`GoogleAuth`].

mod auth;
mod error;
mod indexing;
mod inspection;
mod request;

pub use auth::{AssertionClaims, GoogleAuth, ServiceAccountKey, INDEXING_SCOPE, WEBMASTERS_SCOPE};
pub use error::{ApiError, AuthError};
pub use indexing::{
    IndexingClient, PublishRequest, PublishResponse, UrlNotification, UrlNotificationMetadata,
    URL_UPDATED,
};
pub use inspection::{
    IndexStatusResult, InspectUrlRequest, InspectUrlResponse, InspectionClient, InspectionResult,
};

use crate::state::{Classification, SubmitOutcome};
use async_trait::async_trait;

/// Checks whether a URL is indexed
#[async_trait]
pub trait StatusChecker {
    /// Classifies `url` within the property `site_property`
    ///
    /// Implementations return `Classification::Unknown` on failure instead of
    /// an error.
    async fn inspect(&self, url: &str, site_property: &str) -> Classification;
}

/// Asks for a URL to be (re)indexed
#[async_trait]
pub trait IndexingRequester {
    async fn request_indexing(&self, url: &str) -> SubmitOutcome;
}
