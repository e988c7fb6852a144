//! Error types for Google API access

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while obtaining an access token
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Failed to read service account file {path}: {source}")]
    CredentialsRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse service account file {path}: {source}")]
    CredentialsParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid service account private key: {0}")]
    InvalidKey(jsonwebtoken::errors::Error),

    #[error("Failed to sign token assertion: {0}")]
    Signing(jsonwebtoken::errors::Error),

    #[error("Token request failed: {0}")]
    TokenRequest(#[from] reqwest::Error),

    #[error("Token endpoint rejected the assertion (HTTP {status}): {body}")]
    TokenRejected { status: u16, body: String },
}

/// Failure of a single remote API call
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Unexpected response body: {0}")]
    Decode(String),

    #[error("Authentication failed: {0}")]
    Auth(#[from] AuthError),
}

impl ApiError {
    /// Returns true if the API refused the call because the quota is spent
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, Self::Status { status: 429, .. })
    }

    /// Builds a status error from a response body, using Google's error
    /// message when the body carries one
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.error.message)
            .unwrap_or_else(|| body.trim().to_string());
        Self::Status { status, message }
    }
}

/// Standard Google API error envelope
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: Option<String>,
}
