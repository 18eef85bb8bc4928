//! Integration tests for the news client using WireMock
//!
//! These tests mock HTTP responses to verify client behavior without
//! making actual API calls.

use integration_news::{ChroniclingAmericaClient, NewsClient, NewsConfig, NewsError};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn search_success_response() -> serde_json::Value {
    serde_json::json!({
        "totalItems": 102,
        "startIndex": 81,
        "endIndex": 100,
        "itemsPerPage": 20,
        "items": [
            {
                "lccn": "sn85066387",
                "title": "Oakland tribune.",
                "start_year": "1874",
                "place_of_publication": "Oakland, Calif.",
                "frequency": "Daily"
            }
        ]
    })
}

fn client_for(server: &MockServer) -> ChroniclingAmericaClient {
    let config = NewsConfig {
        base_url: server.uri(),
        ..Default::default()
    };
    ChroniclingAmericaClient::new(config).unwrap()
}

#[tokio::test]
async fn search_titles_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/titles/results/"))
        .and(query_param("terms", "oakland"))
        .and(query_param("format", "json"))
        .and(query_param("page", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_success_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let results = client.search_titles("oakland", 5).await.unwrap();

    assert_eq!(results.total_items, 102);
    assert_eq!(results.items.len(), 1);
    assert_eq!(results.items[0].title, "Oakland tribune.");
}

#[tokio::test]
async fn search_titles_rate_limited() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client.search_titles("oakland", 1).await;

    assert!(matches!(result, Err(NewsError::RateLimitExceeded)));
}

#[tokio::test]
async fn search_titles_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client.search_titles("oakland", 1).await;

    assert!(matches!(result, Err(NewsError::ServiceUnavailable(_))));
}

#[tokio::test]
async fn search_titles_client_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client.search_titles("oakland", 1).await;

    assert!(matches!(result, Err(NewsError::RequestFailed(_))));
}

#[tokio::test]
async fn search_titles_malformed_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client.search_titles("oakland", 1).await;

    assert!(matches!(result, Err(NewsError::ParseError(_))));
}

#[tokio::test]
async fn empty_terms_rejected_without_request() {
    let mock_server = MockServer::start().await;
    // No mock mounted: a request would return 404 and a different error.

    let client = client_for(&mock_server);
    let result = client.search_titles("   ", 1).await;

    assert!(matches!(result, Err(NewsError::InvalidTerms(_))));
}
