use crate::{
    inspection_body, mount_token_endpoint, publish_body, test_auth, test_clients, PROPERTY,
    TEST_PRIVATE_KEY, TEST_TOKEN,
};
use serde_json::json;
use sitemap_indexer::google::{AuthError, GoogleAuth, IndexingRequester, StatusChecker};
use sitemap_indexer::state::{Classification, SubmitOutcome};
use std::path::PathBuf;
use tempfile::TempDir;
use wiremock::matchers::{body_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Writes a service-account key file whose token endpoint lives on `server`
fn write_key_file(dir: &TempDir, server: &MockServer) -> PathBuf {
    let path = dir.path().join("service_account.json");
    let key = json!({
        "type": "service_account",
        "client_email": "indexer@project.iam.gserviceaccount.com",
        "private_key": TEST_PRIVATE_KEY,
        "private_key_id": "key-1",
        "token_uri": format!("{}/token", server.uri())
    });
    std::fs::write(&path, key.to_string()).unwrap();
    path
}

#[tokio::test]
async fn test_token_exchange_uses_jwt_bearer_grant() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains(
            "grant_type=urn%3Aietf%3Aparams%3Aoauth%3Agrant-type%3Ajwt-bearer",
        ))
        .and(body_string_contains("assertion="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": TEST_TOKEN,
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let auth = test_auth(&mock_server);
    let token = auth.access_token().await.expect("token should be granted");

    assert_eq!(token, TEST_TOKEN);
}

#[tokio::test]
async fn test_token_is_cached_between_calls() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": TEST_TOKEN,
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/urlInspection/index:inspect"))
        .respond_with(ResponseTemplate::new(200).set_body_json(inspection_body("INDEXED")))
        .expect(2)
        .mount(&mock_server)
        .await;

    let (inspection, _) = test_clients(&mock_server);
    inspection.inspect("https://example.com/a", PROPERTY).await;
    inspection.inspect("https://example.com/b", PROPERTY).await;
}

#[tokio::test]
async fn test_rejected_assertion_is_auth_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(
            ResponseTemplate::new(400).set_body_string(r#"{"error":"invalid_grant"}"#),
        )
        .mount(&mock_server)
        .await;

    let auth = test_auth(&mock_server);
    let result = auth.access_token().await;

    match result {
        Err(AuthError::TokenRejected { status, body }) => {
            assert_eq!(status, 400);
            assert!(body.contains("invalid_grant"));
        }
        other => panic!("expected rejected token, got {:?}", other),
    }
}

#[tokio::test]
async fn test_inspect_sends_request_record() {
    let mock_server = MockServer::start().await;
    mount_token_endpoint(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/v1/urlInspection/index:inspect"))
        .and(header("authorization", format!("Bearer {}", TEST_TOKEN).as_str()))
        .and(body_json(json!({
            "inspectionUrl": "https://example.com/a",
            "siteUrl": PROPERTY,
            "languageCode": "fr-FR"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(inspection_body("INDEXED")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (inspection, _) = test_clients(&mock_server);
    let classification = inspection.inspect("https://example.com/a", PROPERTY).await;

    assert_eq!(classification, Classification::Indexed);
}

#[tokio::test]
async fn test_inspect_not_indexed_states() {
    let mock_server = MockServer::start().await;
    mount_token_endpoint(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/v1/urlInspection/index:inspect"))
        .and(body_string_contains("https://example.com/crawled"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(inspection_body("Crawled - currently not indexed")),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/urlInspection/index:inspect"))
        .and(body_string_contains("https://example.com/empty"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&mock_server)
        .await;

    let (inspection, _) = test_clients(&mock_server);

    assert_eq!(
        inspection.inspect("https://example.com/crawled", PROPERTY).await,
        Classification::NotIndexed
    );
    assert_eq!(
        inspection.inspect("https://example.com/empty", PROPERTY).await,
        Classification::NotIndexed
    );
}

#[tokio::test]
async fn test_inspect_failure_is_unknown() {
    let mock_server = MockServer::start().await;
    mount_token_endpoint(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/v1/urlInspection/index:inspect"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": {
                "code": 403,
                "message": "You do not own this site",
                "status": "PERMISSION_DENIED"
            }
        })))
        .mount(&mock_server)
        .await;

    let (inspection, _) = test_clients(&mock_server);
    let classification = inspection.inspect("https://example.com/a", PROPERTY).await;

    assert_eq!(classification, Classification::Unknown);
}

#[tokio::test]
async fn test_request_indexing_success() {
    let mock_server = MockServer::start().await;
    mount_token_endpoint(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/v3/urlNotifications:publish"))
        .and(header("authorization", format!("Bearer {}", TEST_TOKEN).as_str()))
        .and(body_json(json!({
            "url": "https://example.com/a",
            "type": "URL_UPDATED"
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(publish_body("https://example.com/a")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let (_, indexing) = test_clients(&mock_server);
    let outcome = indexing.request_indexing("https://example.com/a").await;

    assert!(matches!(outcome, SubmitOutcome::Submitted));
}

#[tokio::test]
async fn test_request_indexing_success_without_json_body() {
    let mock_server = MockServer::start().await;
    mount_token_endpoint(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/v3/urlNotifications:publish"))
        .and(body_string_contains("https://example.com/empty"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v3/urlNotifications:publish"))
        .and(body_string_contains("https://example.com/text"))
        .respond_with(ResponseTemplate::new(200).set_body_string("accepted"))
        .mount(&mock_server)
        .await;

    let (_, indexing) = test_clients(&mock_server);

    let outcome = indexing.request_indexing("https://example.com/empty").await;
    assert!(matches!(outcome, SubmitOutcome::Submitted), "got {:?}", outcome);

    let outcome = indexing.request_indexing("https://example.com/text").await;
    assert!(matches!(outcome, SubmitOutcome::Submitted), "got {:?}", outcome);
}

#[tokio::test]
async fn test_request_indexing_quota_exceeded() {
    let mock_server = MockServer::start().await;
    mount_token_endpoint(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/v3/urlNotifications:publish"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": {
                "code": 429,
                "message": "Quota exceeded for quota metric 'Publish requests'",
                "status": "RESOURCE_EXHAUSTED"
            }
        })))
        .mount(&mock_server)
        .await;

    let (_, indexing) = test_clients(&mock_server);
    let outcome = indexing.request_indexing("https://example.com/a").await;

    assert!(matches!(outcome, SubmitOutcome::QuotaExceeded));
}

#[tokio::test]
async fn test_request_indexing_other_error() {
    let mock_server = MockServer::start().await;
    mount_token_endpoint(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/v3/urlNotifications:publish"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": {
                "code": 403,
                "message": "Permission denied. Failed to verify the URL ownership.",
                "status": "PERMISSION_DENIED"
            }
        })))
        .mount(&mock_server)
        .await;

    let (_, indexing) = test_clients(&mock_server);
    let outcome = indexing.request_indexing("https://example.com/a").await;

    match outcome {
        SubmitOutcome::Failed(e) => {
            assert!(!e.is_quota_exceeded());
            assert!(e.to_string().contains("Failed to verify the URL ownership"));
        }
        other => panic!("expected failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_authorize_fetches_first_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": TEST_TOKEN,
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let key_path = write_key_file(&dir, &mock_server);

    let auth = GoogleAuth::authorize(reqwest::Client::new(), &key_path)
        .await
        .expect("credentials should be accepted");

    assert_eq!(auth.client_email(), "indexer@project.iam.gserviceaccount.com");
    // Served from the cache, the mock expects a single exchange
    assert_eq!(auth.access_token().await.unwrap(), TEST_TOKEN);
}

#[tokio::test]
async fn test_authorize_missing_key_file() {
    let dir = TempDir::new().unwrap();
    let result =
        GoogleAuth::authorize(reqwest::Client::new(), &dir.path().join("missing.json")).await;

    assert!(matches!(result, Err(AuthError::CredentialsRead { .. })));
}

#[tokio::test]
async fn test_authorize_rejected_assertion() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(
            ResponseTemplate::new(401).set_body_string(r#"{"error":"invalid_client"}"#),
        )
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let key_path = write_key_file(&dir, &mock_server);

    let result = GoogleAuth::authorize(reqwest::Client::new(), &key_path).await;

    assert!(matches!(
        result,
        Err(AuthError::TokenRejected { status: 401, .. })
    ));
}
