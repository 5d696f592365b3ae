//! Error types for OAuth token exchanges.

use thiserror::Error;

/// Errors that can occur during a token exchange.
///
/// # Example
///
/// ```rust,ignore
/// use myrxx::auth::oauth::AuthError;
///
/// match exchange_password(&config, "provider@example.com", "pw").await {
///     Ok(token) => println!("Token: {}", token.access_token),
///     Err(AuthError::ExchangeFailed { status, message }) => {
///         println!("Server rejected the exchange ({status}): {message}");
///     }
///     Err(e) => println!("Exchange failed: {e}"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum AuthError {
    /// The token endpoint returned a non-2xx response.
    #[error("Token exchange failed with status {status}: {message}")]
    ExchangeFailed {
        /// The HTTP status code of the response.
        status: u16,
        /// The response body.
        message: String,
    },

    /// A network error occurred while contacting the token endpoint.
    #[error("Network error during token exchange: {0}")]
    Network(#[from] reqwest::Error),
}
