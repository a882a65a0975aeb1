//! Integration tests for change-event submission.
//!
//! These tests run [`JirafeClient`] against a mock API and verify the
//! request shape, the result mapping and the single retry on rejected tokens.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

use async_trait::async_trait;
use jirafe_api::clients::Resource;
use jirafe_api::{
    AccessToken, ChangeResult, HttpError, JirafeClient, JirafeConfig, Session, SessionCore, SiteId,
};
use serde_json::json;
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Session handing out numbered tokens and counting fetches and invalidations.
struct CountingSession {
    core: SessionCore,
    fetches: usize,
    invalidations: usize,
}

impl CountingSession {
    fn new(config: &JirafeConfig) -> Self {
        Self {
            core: SessionCore::new(config, SiteId::new("id").unwrap()),
            fetches: 0,
            invalidations: 0,
        }
    }
}

#[async_trait]
impl Session for CountingSession {
    fn core(&self) -> &SessionCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut SessionCore {
        &mut self.core
    }

    async fn fetch_token(&mut self) -> Result<Option<AccessToken>, HttpError> {
        self.fetches += 1;
        Ok(Some(AccessToken::new(format!("token-{}", self.fetches))))
    }

    fn invalidate(&mut self) {
        self.invalidations += 1;
        self.core_mut().clear_token();
    }
}

/// Serves a single connection whose response promises more body than it sends.
fn truncated_body_server(status_line: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        // Drain headers and body so closing does not reset the connection
        loop {
            let n = stream.read(&mut buf).unwrap();
            request.extend_from_slice(&buf[..n]);
            let text = String::from_utf8_lossy(&request).to_lowercase();
            if let Some(end) = text.find("\r\n\r\n") {
                let length = text
                    .lines()
                    .find_map(|line| line.strip_prefix("content-length:"))
                    .and_then(|value| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if request.len() >= end + 4 + length || n == 0 {
                    break;
                }
            } else if n == 0 {
                break;
            }
        }
        let response =
            format!("HTTP/1.1 {status_line}\r\nContent-Length: 100\r\nConnection: close\r\n\r\npartial");
        stream.write_all(response.as_bytes()).unwrap();
    });

    format!("http://{addr}")
}

fn config_for(server: &MockServer) -> JirafeConfig {
    JirafeConfig::builder()
        .api_url(server.uri())
        .build()
        .unwrap()
}

// ============================================================================
// Result mapping
// ============================================================================

#[tokio::test]
async fn test_every_resource_succeeds_on_200() {
    let server = MockServer::start().await;
    for resource in Resource::ALL {
        Mock::given(method("PUT"))
            .and(path(format!("/v1/id/{resource}")))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
    }

    let config = config_for(&server);
    let client = JirafeClient::new(&config);
    let mut session = CountingSession::new(&config);
    let data = json!({"bar": "baz"});

    let results = [
        client.product_change(&mut session, data.clone()).await.unwrap(),
        client.category_change(&mut session, data.clone()).await.unwrap(),
        client.cart_change(&mut session, data.clone()).await.unwrap(),
        client.order_change(&mut session, data.clone()).await.unwrap(),
        client.customer_change(&mut session, data).await.unwrap(),
    ];

    for result in results {
        assert_eq!(serde_json::to_value(result).unwrap(), json!({"success": true}));
    }
    assert_eq!(session.fetches, 1);
    assert_eq!(session.invalidations, 0);
}

#[tokio::test]
async fn test_request_shape() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v1/id/product"))
        .and(header("Authorization", "Bearer token-1"))
        .and(header("Content-Type", "application/json"))
        .and(body_string(r#"{"bar":"baz"}"#))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let client = JirafeClient::new(&config);
    let mut session = CountingSession::new(&config);

    let result = client
        .product_change(&mut session, json!({"bar": "baz"}))
        .await
        .unwrap();

    assert!(result.is_success());
}

#[tokio::test]
async fn test_raw_string_body_is_sent_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v1/id/order"))
        .and(body_string(r#"{ "id": 7 }"#))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let client = JirafeClient::new(&config);
    let mut session = CountingSession::new(&config);

    let result = client
        .order_change(&mut session, r#"{ "id": 7 }"#)
        .await
        .unwrap();

    assert!(result.is_success());
}

#[tokio::test]
async fn test_validation_errors_returned_without_retry() {
    let server = MockServer::start().await;
    let errors = json!({"foo": "foo error", "bar": "bar error"});
    Mock::given(method("PUT"))
        .and(path("/v1/id/product"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "errors": errors })))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let client = JirafeClient::new(&config);
    let mut session = CountingSession::new(&config);

    let result = client
        .product_change(&mut session, json!({"bar": "baz"}))
        .await
        .unwrap();

    assert_eq!(
        serde_json::to_value(result).unwrap(),
        json!({"success": false, "error_type": "validation", "errors": errors})
    );
    assert_eq!(session.invalidations, 0);
}

#[tokio::test]
async fn test_validation_without_errors_is_empty_object() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v1/id/cart"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let client = JirafeClient::new(&config);
    let mut session = CountingSession::new(&config);

    let result = client.cart_change(&mut session, json!({})).await.unwrap();

    assert_eq!(result, ChangeResult::Validation { errors: json!({}) });
}

#[tokio::test]
async fn test_unknown_status_keeps_raw_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v1/id/customer"))
        .respond_with(ResponseTemplate::new(503).set_body_string("response text"))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let client = JirafeClient::new(&config);
    let mut session = CountingSession::new(&config);

    let result = client
        .customer_change(&mut session, json!({"bar": "baz"}))
        .await
        .unwrap();

    assert_eq!(
        serde_json::to_value(result).unwrap(),
        json!({"success": false, "error_type": "unknown", "raw": "response text"})
    );
    assert_eq!(session.invalidations, 0);
}

// ============================================================================
// Authorization retry
// ============================================================================

#[tokio::test]
async fn test_rejected_token_is_refreshed_and_request_retried() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v1/id/product"))
        .and(header("Authorization", "Bearer token-1"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/v1/id/product"))
        .and(header("Authorization", "Bearer token-2"))
        .and(body_string(r#"{"bar":"baz"}"#))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let client = JirafeClient::new(&config);
    let mut session = CountingSession::new(&config);

    let result = client
        .product_change(&mut session, json!({"bar": "baz"}))
        .await
        .unwrap();

    assert!(result.is_success());
    assert_eq!(session.fetches, 2);
    assert_eq!(session.invalidations, 1);
}

#[tokio::test]
async fn test_401_is_treated_as_authorization_failure() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v1/id/category"))
        .respond_with(ResponseTemplate::new(401))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/v1/id/category"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let client = JirafeClient::new(&config);
    let mut session = CountingSession::new(&config);

    let result = client.category_change(&mut session, json!({})).await.unwrap();

    assert!(result.is_success());
    assert_eq!(session.invalidations, 1);
}

#[tokio::test]
async fn test_second_rejection_gives_authorization_result() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v1/id/product"))
        .respond_with(ResponseTemplate::new(403))
        .expect(2)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let client = JirafeClient::new(&config);
    let mut session = CountingSession::new(&config);

    let result = client
        .product_change(&mut session, json!({"bar": "baz"}))
        .await
        .unwrap();

    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({"success": false, "error_type": "authorization"})
    );
    assert!(result.is_authorization_error());
    assert_eq!(session.invalidations, 1);
}

#[tokio::test]
async fn test_each_call_gets_its_own_retry() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v1/id/order"))
        .respond_with(ResponseTemplate::new(403))
        .expect(4)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let client = JirafeClient::new(&config);
    let mut session = CountingSession::new(&config);

    for _ in 0..2 {
        let result = client.order_change(&mut session, json!({})).await.unwrap();
        assert_eq!(result, ChangeResult::Authorization);
    }
    assert_eq!(session.invalidations, 2);
}

#[tokio::test]
async fn test_unreachable_api_is_network_error() {
    let config = JirafeConfig::builder()
        .api_url("http://127.0.0.1:9")
        .build()
        .unwrap();
    let client = JirafeClient::new(&config);
    let mut session = CountingSession::new(&config);

    let result = client.product_change(&mut session, json!({})).await;

    assert!(matches!(result, Err(HttpError::Network(_))));
}

#[tokio::test]
async fn test_truncated_response_body_is_network_error() {
    let config = JirafeConfig::builder()
        .api_url(truncated_body_server("503 Service Unavailable"))
        .build()
        .unwrap();
    let client = JirafeClient::new(&config);
    let mut session = CountingSession::new(&config);

    let result = client.product_change(&mut session, json!({})).await;

    assert!(matches!(result, Err(HttpError::Network(_))));
}
