//! OAuth password-style grants for the MyRxx API.
//!
//! The MyRxx token endpoint implements a password grant and two
//! credentials-style variants built on the same request shape:
//!
//! - [`exchange_password`]: authenticate an already-registered provider
//!   with their email and password.
//! - [`exchange_office_credentials`]: register-and-authenticate in one
//!   step by sending the office's and provider's serialized forms.
//! - [`exchange_office_code`]: authenticate against an existing office by
//!   its application code, together with the provider's serialized form.
//!
//! The credentials-style grants reuse the password grant shape with an
//! empty username and password, matching the remote service's wire
//! contract.
//!
//! Callers normally do not use these functions directly; the
//! [`Api`](crate::Api) login operations choose the right grant based on
//! whether the provider is registered (see
//! [`Api::requires_password`](crate::Api::requires_password)).

use serde::Serialize;
use serde_json::{Map, Value};

use crate::auth::oauth::error::AuthError;
use crate::auth::token::AccessToken;
use crate::config::MyRxxConfig;

/// Grant type shared by all MyRxx token exchanges.
const PASSWORD_GRANT_TYPE: &str = "password";

/// Path of the token endpoint, relative to the server base URL.
const TOKEN_ENDPOINT: &str = "oauth/token";

/// Request body for the token endpoint.
#[derive(Debug, Serialize)]
struct TokenRequest<'a> {
    grant_type: &'a str,
    username: &'a str,
    password: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    office: Option<&'a Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    office_code: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    provider: Option<&'a Map<String, Value>>,
}

/// Exchanges a provider's email and password for an access token.
///
/// # Arguments
///
/// * `config` - Client configuration providing credentials and the server URL
/// * `username` - The provider's email address
/// * `password` - The provider's password
///
/// # Errors
///
/// - [`AuthError::ExchangeFailed`] if the token endpoint rejects the exchange
/// - [`AuthError::Network`] if the endpoint cannot be reached
///
/// # Example
///
/// ```rust,ignore
/// let token = exchange_password(&config, "provider@example.com", "123456").await?;
/// ```
pub async fn exchange_password(
    config: &MyRxxConfig,
    username: &str,
    password: &str,
) -> Result<AccessToken, AuthError> {
    let request = TokenRequest {
        grant_type: PASSWORD_GRANT_TYPE,
        username,
        password,
        client_id: config.client_id().as_ref(),
        client_secret: config.client_secret().as_ref(),
        office: None,
        office_code: None,
        provider: None,
    };

    request_token(config, &request).await
}

/// Exchanges an office's and provider's serialized forms for an access token.
///
/// Used when the office has no application code yet: the remote service
/// registers both records as part of the grant.
///
/// # Errors
///
/// - [`AuthError::ExchangeFailed`] if the token endpoint rejects the exchange
/// - [`AuthError::Network`] if the endpoint cannot be reached
pub async fn exchange_office_credentials(
    config: &MyRxxConfig,
    office: &Map<String, Value>,
    provider: &Map<String, Value>,
) -> Result<AccessToken, AuthError> {
    let request = TokenRequest {
        grant_type: PASSWORD_GRANT_TYPE,
        username: "",
        password: "",
        client_id: config.client_id().as_ref(),
        client_secret: config.client_secret().as_ref(),
        office: Some(office),
        office_code: None,
        provider: Some(provider),
    };

    request_token(config, &request).await
}

/// Exchanges an office's application code and a provider's serialized form
/// for an access token.
///
/// # Errors
///
/// - [`AuthError::ExchangeFailed`] if the token endpoint rejects the exchange
/// - [`AuthError::Network`] if the endpoint cannot be reached
pub async fn exchange_office_code(
    config: &MyRxxConfig,
    office_code: &str,
    provider: &Map<String, Value>,
) -> Result<AccessToken, AuthError> {
    let request = TokenRequest {
        grant_type: PASSWORD_GRANT_TYPE,
        username: "",
        password: "",
        client_id: config.client_id().as_ref(),
        client_secret: config.client_secret().as_ref(),
        office: None,
        office_code: Some(office_code),
        provider: Some(provider),
    };

    request_token(config, &request).await
}

/// Sends a grant request to the token endpoint and parses the response.
async fn request_token(
    config: &MyRxxConfig,
    request: &TokenRequest<'_>,
) -> Result<AccessToken, AuthError> {
    let token_url = format!(
        "{}/{TOKEN_ENDPOINT}",
        config.server_url().trim_end_matches('/')
    );

    let client = reqwest::Client::new();
    let response = client.post(&token_url).json(request).send().await?;

    let status = response.status().as_u16();

    if !response.status().is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(AuthError::ExchangeFailed { status, message });
    }

    let token: AccessToken =
        response
            .json()
            .await
            .map_err(|e| AuthError::ExchangeFailed {
                status,
                message: format!("Failed to parse token response: {e}"),
            })?;

    tracing::debug!(grant_type = request.grant_type, "token exchange completed");

    Ok(token)
}

// Verify types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TokenRequest<'_>>();
};
