//! Error types for the HTTP transport layer.
//!
//! A failed exchange surfaces as one of three [`HttpError`] variants:
//! the server answered with a non-2xx status ([`HttpResponseError`],
//! which keeps the parsed body), the request was malformed before it
//! was sent ([`InvalidHttpRequestError`]), or the exchange never
//! completed (`Network`).

use thiserror::Error;

/// A non-2xx response from the MyRxx API.
///
/// The parsed JSON body is kept on the error so callers can read
/// structured payloads out of it; the patient save operation reads the
/// `message` field this way to capture validation rejections.
///
/// # Example
///
/// ```rust
/// use myrxx::clients::HttpResponseError;
/// use serde_json::json;
///
/// let error = HttpResponseError {
///     code: 422,
///     body: json!({"message": "Email can't be blank"}),
///     error_reference: None,
/// };
/// assert_eq!(error.to_string(), r#"HTTP 422: {"message":"Email can't be blank"}"#);
/// ```
#[derive(Debug, Error)]
#[error("HTTP {code}: {body}")]
pub struct HttpResponseError {
    /// Status code of the response.
    pub code: u16,
    /// Parsed JSON response body.
    pub body: serde_json::Value,
    /// The server's `X-Request-Id`, when present, for support reports.
    pub error_reference: Option<String>,
}

/// A request that failed validation before being sent.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// The method requires a body and none was set.
    #[error("A {method} request requires a body.")]
    MissingBody {
        /// The offending method's wire name.
        method: &'static str,
    },
}

/// Any failure of the HTTP transport layer.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The server answered with a non-2xx status.
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// The request failed validation before sending.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// The exchange never completed.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}
