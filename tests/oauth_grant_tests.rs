//! Integration tests for the OAuth token exchanges and login operations.
//!
//! These tests verify the wire shape of each grant against a mock token
//! endpoint, and that the login operations pick the right grant for the
//! office/provider principal.

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use myrxx::auth::oauth::{
    exchange_office_code, exchange_office_credentials, exchange_password, AuthError,
};
use myrxx::{
    Api, ApiError, ApiObject, ClientId, ClientSecret, MyRxxConfig, Office, Provider, RedirectUri,
};

fn create_config(server: &MockServer) -> MyRxxConfig {
    MyRxxConfig::builder()
        .client_id(ClientId::new("test-id").unwrap())
        .client_secret(ClientSecret::new("test-secret").unwrap())
        .redirect_uri(RedirectUri::new("http://localhost:3001/cb").unwrap())
        .server_url(server.uri())
        .build()
        .unwrap()
}

fn token_response() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "access_token": "granted-token",
        "token_type": "bearer",
        "expires_in": 7200
    }))
}

// ============================================================================
// Grant wire shapes
// ============================================================================

#[tokio::test]
async fn test_password_grant_sends_credentials_and_parses_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(body_partial_json(json!({
            "grant_type": "password",
            "username": "provider@example.com",
            "password": "123456",
            "client_id": "test-id",
            "client_secret": "test-secret"
        })))
        .respond_with(token_response())
        .mount(&server)
        .await;

    let config = create_config(&server);
    let token = exchange_password(&config, "provider@example.com", "123456")
        .await
        .unwrap();

    assert_eq!(token.access_token, "granted-token");
    assert_eq!(token.token_type.as_deref(), Some("bearer"));
    assert_eq!(token.expires_in, Some(7200));
}

#[tokio::test]
async fn test_office_credentials_grant_sends_both_serialized_forms() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(body_partial_json(json!({
            "grant_type": "password",
            "username": "",
            "password": "",
            "office": {"name": "Clinic A"},
            "provider": {"user_attributes": {"email": "provider@example.com"}}
        })))
        .respond_with(token_response())
        .mount(&server)
        .await;

    let config = create_config(&server);
    let office = json!({"name": "Clinic A"});
    let provider = json!({"user_attributes": {"email": "provider@example.com"}});

    let token = exchange_office_credentials(
        &config,
        office.as_object().unwrap(),
        provider.as_object().unwrap(),
    )
    .await
    .unwrap();

    assert_eq!(token.access_token, "granted-token");
}

#[tokio::test]
async fn test_office_code_grant_sends_code_instead_of_office() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(body_partial_json(json!({
            "grant_type": "password",
            "office_code": "CODE123"
        })))
        .respond_with(token_response())
        .mount(&server)
        .await;

    let config = create_config(&server);
    let provider = json!({"user_attributes": {}});

    let token = exchange_office_code(&config, "CODE123", provider.as_object().unwrap())
        .await
        .unwrap();

    assert_eq!(token.access_token, "granted-token");
}

#[tokio::test]
async fn test_rejected_exchange_reports_status_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "invalid_client"
        })))
        .mount(&server)
        .await;

    let config = create_config(&server);
    let result = exchange_password(&config, "provider@example.com", "wrong").await;

    match result {
        Err(AuthError::ExchangeFailed { status, message }) => {
            assert_eq!(status, 401);
            assert!(message.contains("invalid_client"));
        }
        other => panic!("Expected ExchangeFailed, got {other:?}"),
    }
}

// ============================================================================
// Login operations
// ============================================================================

#[tokio::test]
async fn test_login_with_password_uses_provider_email() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(body_partial_json(json!({
            "username": "provider@example.com",
            "password": "123456"
        })))
        .respond_with(token_response())
        .mount(&server)
        .await;

    let provider = Provider {
        email: Some("provider@example.com".to_string()),
        ..Provider::default()
    };
    let mut api = Api::new(create_config(&server), Office::default(), provider);

    api.login_with_password("123456").await.unwrap();

    assert_eq!(api.access_token().unwrap().access_token, "granted-token");
}

#[tokio::test]
async fn test_login_without_password_registers_office_when_code_is_blank() {
    let server = MockServer::start().await;

    let office = Office {
        name: Some("Clinic A".to_string()),
        ..Office::default()
    };
    let provider = Provider {
        email: Some("provider@example.com".to_string()),
        ..Provider::default()
    };

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(body_partial_json(json!({
            "office": office.to_map(),
            "provider": provider.to_map()
        })))
        .respond_with(token_response())
        .mount(&server)
        .await;

    let mut api = Api::new(create_config(&server), office, provider);

    api.login_without_password().await.unwrap();

    assert!(api.access_token().is_some());
}

#[tokio::test]
async fn test_login_without_password_uses_application_code_when_present() {
    let server = MockServer::start().await;

    let office = Office {
        application_code: Some("CODE123".to_string()),
        ..Office::default()
    };
    let provider = Provider::default();

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(body_partial_json(json!({
            "office_code": "CODE123",
            "provider": provider.to_map()
        })))
        .respond_with(token_response())
        .mount(&server)
        .await;

    let mut api = Api::new(create_config(&server), office, provider);

    api.login_without_password().await.unwrap();

    assert!(api.access_token().is_some());
}

#[tokio::test]
async fn test_failed_login_surfaces_auth_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant"
        })))
        .mount(&server)
        .await;

    let mut api = Api::new(create_config(&server), Office::default(), Provider::default());
    let result = api.login_with_password("wrong").await;

    assert!(matches!(
        result,
        Err(ApiError::Auth(AuthError::ExchangeFailed { status: 400, .. }))
    ));
    assert!(api.access_token().is_none());
}

// ============================================================================
// Password requirement flow
// ============================================================================

#[tokio::test]
async fn test_requires_password_true_for_registered_provider() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/providers/exists"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let provider = Provider {
        email: Some("provider@example.com".to_string()),
        ..Provider::default()
    };
    let api = Api::new(create_config(&server), Office::default(), provider);

    assert!(api.requires_password().await.unwrap());
}

#[tokio::test]
async fn test_requires_password_false_for_unknown_provider() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/providers/exists"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({})))
        .mount(&server)
        .await;

    let provider = Provider {
        email: Some("new-provider@example.com".to_string()),
        ..Provider::default()
    };
    let api = Api::new(create_config(&server), Office::default(), provider);

    assert!(!api.requires_password().await.unwrap());
}
