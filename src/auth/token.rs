//! Access token type for authenticated API calls.

use serde::{Deserialize, Serialize};

/// An OAuth access token for the MyRxx API.
///
/// Tokens are obtained through one of the grant functions in
/// [`oauth`](crate::auth::oauth), or adopted from a stored mapping via
/// serde deserialization (see
/// [`Api::login_with_access_token`](crate::Api::login_with_access_token)).
///
/// # Serialization
///
/// `AccessToken` round-trips through the JSON shape the token endpoint
/// returns: `access_token` plus the optional `token_type`, `expires_in`,
/// and `refresh_token` fields.
///
/// # Example
///
/// ```rust
/// use myrxx::AccessToken;
///
/// // Adopt a stored token mapping without a network call
/// let token: AccessToken =
///     serde_json::from_str(r#"{"access_token":"abc","token_type":"bearer"}"#).unwrap();
/// assert_eq!(token.access_token, "abc");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    /// The bearer token value attached to authenticated requests.
    pub access_token: String,
    /// The token type reported by the server (usually "bearer").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    /// Lifetime of the token in seconds, if the server reports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
    /// Refresh token, if the server issues one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

impl AccessToken {
    /// Creates a token from a bare token value.
    #[must_use]
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: None,
            expires_in: None,
            refresh_token: None,
        }
    }

    /// Returns the `Authorization` header value for this token.
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}
