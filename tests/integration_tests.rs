//! Integration tests for the Jirafe API client.
//!
//! These tests verify end-to-end flows: configuration, a real session
//! strategy obtaining a token and the client submitting change events.

use jirafe_api::{
    ApiVersion, AuthorizationHeaderSession, ChangePayload, ChangeResult, ClientCredentials,
    ClientId, ClientSecret, ConfigError, JirafeClient, JirafeConfig, OAuth2Session, SiteId,
    UsernameSession,
};
use serde::Serialize;
use serde_json::json;
use wiremock::matchers::{body_string, body_string_contains, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> JirafeConfig {
    JirafeConfig::builder()
        .api_url(server.uri())
        .token_url(format!("{}/oauth2/access_token", server.uri()))
        .profile_url(format!("{}/accounts/profile", server.uri()))
        .build()
        .unwrap()
}

fn credentials() -> ClientCredentials {
    ClientCredentials::new(
        ClientId::new("client-id").unwrap(),
        ClientSecret::new("client-secret").unwrap(),
    )
}

#[test]
fn test_invalid_configuration_inputs() {
    assert!(matches!(SiteId::new("  "), Err(ConfigError::EmptySiteId)));
    assert!(matches!(ClientId::new(""), Err(ConfigError::EmptyClientId)));
    assert!(matches!(
        ClientSecret::new(""),
        Err(ConfigError::EmptyClientSecret)
    ));
    assert!(matches!(
        JirafeConfig::builder().api_url("ftp://api.jirafe.com").build(),
        Err(ConfigError::InvalidUrl { .. })
    ));
    assert!(matches!(
        "latest".parse::<ApiVersion>(),
        Err(ConfigError::InvalidApiVersion { .. })
    ));
}

#[tokio::test]
async fn test_header_session_submits_order() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v1/1234/order"))
        .and(header("Authorization", "Bearer abc123"))
        .and(header_exists("User-Agent"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let client = JirafeClient::new(&config);
    let mut session =
        AuthorizationHeaderSession::new(&config, SiteId::new("1234").unwrap(), "Bearer abc123");

    let result = client
        .order_change(&mut session, json!({"id": "order-1", "total": 10.5}))
        .await
        .unwrap();

    assert_eq!(result, ChangeResult::Success);
}

#[tokio::test]
async fn test_username_session_fetches_token_once_for_many_changes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth2/access_token"))
        .and(body_string_contains("grant_type=password"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "tok"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(header("Authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200))
        .expect(3)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let client = JirafeClient::new(&config);
    let mut session = UsernameSession::new(
        &config,
        SiteId::new("1234").unwrap(),
        "user",
        "pw",
        credentials(),
    );

    for _ in 0..3 {
        let result = client
            .product_change(&mut session, json!({"id": "sku"}))
            .await
            .unwrap();
        assert!(result.is_success());
    }
}

#[tokio::test]
async fn test_oauth2_code_flow_recovers_from_expired_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth2/access_token"))
        .and(body_string_contains("grant_type=authorization_code"))
        .and(body_string_contains("redirect_uri=https%3A%2F%2Fshop.example.com%2Fcb"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "expired",
            "refresh_token": "refresh"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/oauth2/access_token"))
        .and(body_string_contains("grant_type=refresh_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "fresh"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/v1/1234/cart"))
        .and(header("Authorization", "Bearer expired"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/v1/1234/cart"))
        .and(header("Authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let client = JirafeClient::new(&config);
    let mut session = OAuth2Session::new(&config, SiteId::new("1234").unwrap(), credentials())
        .with_code("code")
        .with_redirect_uri("https://shop.example.com/cb");

    let result = client
        .cart_change(&mut session, json!({"id": "cart-1"}))
        .await
        .unwrap();

    assert!(result.is_success());
    // The refresh response did not rotate the token
    assert_eq!(session.refresh_token(), Some("refresh"));
    assert!(session.code().is_none());
}

#[tokio::test]
async fn test_rejected_supplied_token_is_replaced_via_refresh_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth2/access_token"))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains("refresh_token=r1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "fresh",
            "refresh_token": "r2"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/v1/1234/product"))
        .and(header("Authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/v1/1234/product"))
        .and(header("Authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let client = JirafeClient::new(&config);
    let mut session = OAuth2Session::new(&config, SiteId::new("1234").unwrap(), credentials())
        .with_access_token("stale")
        .with_refresh_token("r1");

    let result = client
        .product_change(&mut session, json!({"id": "sku"}))
        .await
        .unwrap();

    assert_eq!(result, ChangeResult::Success);
    assert_eq!(session.refresh_token(), Some("r2"));
}

#[tokio::test]
async fn test_typed_payload_submission() {
    #[derive(Serialize)]
    struct Customer<'a> {
        id: u32,
        email: &'a str,
    }

    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v1/1234/customer"))
        .and(body_string(r#"{"email":"a@example.com","id":5}"#))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let client = JirafeClient::new(&config);
    let mut session =
        AuthorizationHeaderSession::new(&config, SiteId::new("1234").unwrap(), "Bearer abc");

    let payload = ChangePayload::from_serialize(&Customer {
        id: 5,
        email: "a@example.com",
    })
    .unwrap();
    let result = client.customer_change(&mut session, payload).await.unwrap();

    assert!(result.is_success());
}
