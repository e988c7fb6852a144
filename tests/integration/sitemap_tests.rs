use crate::sitemap_xml;
use sitemap_indexer::sitemap::{fetch_sitemap, HttpSitemapSource, SitemapError, SitemapSource};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_fetch_sitemap_extracts_locs() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(sitemap_xml(&[
                    "<loc>https://example.com/a</loc>",
                    "<lastmod>2024-01-01</lastmod>",
                ]))
                .insert_header("content-type", "application/xml"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = reqwest::Client::new();
    let urls = fetch_sitemap(&client, &format!("{}/sitemap.xml", mock_server.uri()))
        .await
        .expect("sitemap should be fetched");

    assert_eq!(urls, vec!["https://example.com/a".to_string()]);
}

#[tokio::test]
async fn test_non_success_status_is_fetch_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let source = HttpSitemapSource::new(reqwest::Client::new());
    let result = source
        .fetch(&format!("{}/sitemap.xml", mock_server.uri()))
        .await;

    match result {
        Err(SitemapError::Fetch { status, .. }) => assert_eq!(status, 404),
        other => panic!("expected fetch error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<urlset><url></urlset>"))
        .mount(&mock_server)
        .await;

    let client = reqwest::Client::new();
    let result = fetch_sitemap(&client, &format!("{}/sitemap.xml", mock_server.uri())).await;

    assert!(matches!(result, Err(SitemapError::Parse(_))));
}

#[tokio::test]
async fn test_empty_urlset_is_not_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sitemap_xml(&[])))
        .mount(&mock_server)
        .await;

    let client = reqwest::Client::new();
    let urls = fetch_sitemap(&client, &format!("{}/sitemap.xml", mock_server.uri()))
        .await
        .unwrap();

    assert!(urls.is_empty());
}

#[tokio::test]
async fn test_non_utf8_sitemap_is_parse_error() {
    let mock_server = MockServer::start().await;

    let body = b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?>\n\
<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\
<url><loc>https://example.com/caf\xE9</loc></url></urlset>"
        .to_vec();

    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(body, "application/xml; charset=ISO-8859-1"),
        )
        .mount(&mock_server)
        .await;

    let client = reqwest::Client::new();
    let result = fetch_sitemap(&client, &format!("{}/sitemap.xml", mock_server.uri())).await;

    assert!(matches!(result, Err(SitemapError::Parse(_))), "got {:?}", result);
}
