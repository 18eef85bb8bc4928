//! Integration tests for the IP client using WireMock

use integration_ip::{IpClient, IpConfig, IpError, IpifyClient};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn client_for(server: &MockServer) -> IpifyClient {
    let config = IpConfig {
        base_url: server.uri(),
        ..Default::default()
    };
    IpifyClient::new(config).unwrap()
}

#[tokio::test]
async fn current_ip_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("format", "json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"ip": "198.51.100.42"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client.current_ip().await.unwrap();

    assert_eq!(result.ip, "198.51.100.42");
}

#[tokio::test]
async fn current_ip_request_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client.current_ip().await;

    assert!(matches!(result, Err(IpError::RequestFailed(_))));
}

#[tokio::test]
async fn current_ip_malformed_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("just text"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client.current_ip().await;

    assert!(matches!(result, Err(IpError::ParseError(_))));
}
