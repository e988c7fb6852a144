//! Service-account authentication
//!
//! Implements the OAuth2 JWT-bearer flow: a claim set signed with the
//! service account's RSA key is exchanged at the token endpoint for a
//! short-lived access token, which is cached until shortly before it expires.

use crate::google::AuthError;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::sync::Mutex;

/// Scope for the Search Console URL Inspection API
pub const WEBMASTERS_SCOPE: &str = "https://www.googleapis.com/auth/webmasters";

/// Scope for the Indexing API
pub const INDEXING_SCOPE: &str = "https://www.googleapis.com/auth/indexing";

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Lifetime requested for each assertion (Google's maximum)
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Tokens are refreshed this long before they actually expire
const EXPIRY_MARGIN_SECS: i64 = 60;

/// The fields of a service-account JSON key that the flow needs
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl ServiceAccountKey {
    /// Reads a key from a JSON key file
    pub fn from_file(path: &Path) -> Result<Self, AuthError> {
        let content =
            std::fs::read_to_string(path).map_err(|source| AuthError::CredentialsRead {
                path: path.to_path_buf(),
                source,
            })?;

        serde_json::from_str(&content).map_err(|source| AuthError::CredentialsParse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// JWT claim set sent to the token endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct AssertionClaims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
}

fn default_expires_in() -> i64 {
    ASSERTION_LIFETIME_SECS
}

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(EXPIRY_MARGIN_SECS) < self.expires_at
    }
}

/// Access-token provider for a service account
///
/// Shared by the inspection and indexing clients; a single token carries both
/// scopes.
pub struct GoogleAuth {
    client: Client,
    key: ServiceAccountKey,
    encoding_key: EncodingKey,
    scopes: Vec<String>,
    cached: Mutex<Option<CachedToken>>,
}

impl std::fmt::Debug for GoogleAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleAuth")
            .field("client_email", &self.key.client_email)
            .field("token_uri", &self.key.token_uri)
            .field("scopes", &self.scopes)
            .finish_non_exhaustive()
    }
}

impl GoogleAuth {
    /// Creates a provider from an already-parsed key
    ///
    /// Fails with `AuthError::InvalidKey` if the private key is not a valid RSA PEM.
    pub fn new(client: Client, key: ServiceAccountKey) -> Result<Self, AuthError> {
        let encoding_key =
            EncodingKey::from_rsa_pem(key.private_key.as_bytes()).map_err(AuthError::InvalidKey)?;

        Ok(Self {
            client,
            key,
            encoding_key,
            scopes: vec![WEBMASTERS_SCOPE.to_string(), INDEXING_SCOPE.to_string()],
            cached: Mutex::new(None),
        })
    }

    /// Creates a provider from a service-account JSON key file
    pub fn from_service_account_file(client: Client, path: &Path) -> Result<Self, AuthError> {
        let key = ServiceAccountKey::from_file(path)?;
        tracing::debug!("Loaded service account {}", key.client_email);
        Self::new(client, key)
    }

    /// Loads the key file and fetches a first token
    ///
    /// Used before a run starts so that unreadable credentials or a rejected
    /// assertion abort the run instead of surfacing as per-URL failures.
    pub async fn authorize(client: Client, path: &Path) -> Result<Self, AuthError> {
        let auth = Self::from_service_account_file(client, path)?;
        auth.access_token().await?;
        tracing::info!("Authenticated as {}", auth.client_email());
        Ok(auth)
    }

    /// Returns the service account's email address
    pub fn client_email(&self) -> &str {
        &self.key.client_email
    }

    /// Returns a valid access token, fetching a new one when needed
    pub async fn access_token(&self) -> Result<String, AuthError> {
        let mut cached = self.cached.lock().await;

        let now = Utc::now();
        if let Some(token) = cached.as_ref().filter(|t| t.is_fresh(now)) {
            return Ok(token.value.clone());
        }

        let token = self.request_token(now).await?;
        let value = token.value.clone();
        *cached = Some(token);
        Ok(value)
    }

    /// Builds and signs the JWT assertion for the given issue time
    pub fn build_assertion(&self, now: DateTime<Utc>) -> Result<String, AuthError> {
        let claims = AssertionClaims {
            iss: self.key.client_email.clone(),
            scope: self.scopes.join(" "),
            aud: self.key.token_uri.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(ASSERTION_LIFETIME_SECS)).timestamp(),
        };

        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.key.private_key_id.clone();

        encode(&header, &claims, &self.encoding_key).map_err(AuthError::Signing)
    }

    async fn request_token(&self, now: DateTime<Utc>) -> Result<CachedToken, AuthError> {
        let assertion = self.build_assertion(now)?;

        tracing::debug!("Requesting access token from {}", self.key.token_uri);
        let response = self
            .client
            .post(&self.key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::TokenRejected {
                status: status.as_u16(),
                body,
            });
        }

        let token: TokenResponse = response.json().await?;
        Ok(CachedToken {
            value: token.access_token,
            expires_at: now + Duration::seconds(token.expires_in),
        })
    }
}
