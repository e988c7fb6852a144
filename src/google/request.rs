//! Authorized JSON calls shared by the API clients

use crate::google::{ApiError, GoogleAuth};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// POSTs `body` as JSON to `endpoint` with a bearer token and returns the raw reply
///
/// Non-success statuses become `ApiError::Status`, carrying Google's error
/// message when the body has one. A success reply is returned untouched,
/// whatever its body looks like.
pub(crate) async fn post_authorized<B>(
    client: &Client,
    auth: &GoogleAuth,
    endpoint: &str,
    body: &B,
) -> Result<String, ApiError>
where
    B: Serialize + ?Sized,
{
    let token = auth.access_token().await?;

    let response = client
        .post(endpoint)
        .bearer_auth(token)
        .json(body)
        .send()
        .await?;

    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        return Err(ApiError::from_response(status.as_u16(), &text));
    }

    Ok(text)
}

/// Like [`post_authorized`], but decodes the success reply as `R`
pub(crate) async fn post_json<B, R>(
    client: &Client,
    auth: &GoogleAuth,
    endpoint: &str,
    body: &B,
) -> Result<R, ApiError>
where
    B: Serialize + ?Sized,
    R: DeserializeOwned,
{
    let text = post_authorized(client, auth, endpoint, body).await?;
    serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
}
