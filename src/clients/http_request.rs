//! HTTP request construction for the MyRxx API client.

use std::collections::HashMap;
use std::fmt;

use crate::clients::errors::InvalidHttpRequestError;

/// The HTTP methods the MyRxx surface uses.
///
/// Reads are GET, creates are POST, updates are PUT. Nothing on the
/// surface deletes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// Retrieve a resource.
    Get,
    /// Create a resource.
    Post,
    /// Update a resource.
    Put,
}

impl HttpMethod {
    /// Returns the method name as sent on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
        }
    }

    /// Returns `true` if requests with this method must carry a body.
    #[must_use]
    pub const fn requires_body(self) -> bool {
        matches!(self, Self::Post | Self::Put)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One request to the MyRxx API, ready for [`HttpClient`] to send.
///
/// Bodies are always JSON. Construct requests through
/// [`HttpRequest::builder`]; building validates the method/body pairing.
///
/// # Example
///
/// ```rust
/// use myrxx::clients::{HttpMethod, HttpRequest};
/// use serde_json::json;
///
/// let lookup = HttpRequest::builder(HttpMethod::Get, "api/v2/patients/find")
///     .query_param("email", "ada@example.com")
///     .build()
///     .unwrap();
/// assert_eq!(lookup.query, vec![("email".to_string(), "ada@example.com".to_string())]);
///
/// let create = HttpRequest::builder(HttpMethod::Post, "api/v2/patients")
///     .body(json!({"patient": {"first_name": "Ada"}}))
///     .build()
///     .unwrap();
/// assert!(create.body.is_some());
/// ```
///
/// [`HttpClient`]: crate::clients::HttpClient
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// The HTTP method.
    pub http_method: HttpMethod,
    /// Path relative to the server base URL, no leading slash.
    pub path: String,
    /// JSON body, required for POST and PUT.
    pub body: Option<serde_json::Value>,
    /// Query parameters, in the order they were added.
    pub query: Vec<(String, String)>,
    /// Headers set for this request on top of the client defaults.
    pub extra_headers: HashMap<String, String>,
}

impl HttpRequest {
    /// Starts building a request with the given method and path.
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder {
            request: Self {
                http_method: method,
                path: path.into(),
                body: None,
                query: Vec::new(),
                extra_headers: HashMap::new(),
            },
        }
    }

    /// Checks the method/body pairing.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError::MissingBody`] if the method
    /// requires a body and none was set.
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if self.http_method.requires_body() && self.body.is_none() {
            return Err(InvalidHttpRequestError::MissingBody {
                method: self.http_method.as_str(),
            });
        }
        Ok(())
    }
}

/// Fluent builder for [`HttpRequest`].
#[derive(Debug)]
pub struct HttpRequestBuilder {
    request: HttpRequest,
}

impl HttpRequestBuilder {
    /// Sets the JSON body.
    #[must_use]
    pub fn body(mut self, body: impl Into<serde_json::Value>) -> Self {
        self.request.body = Some(body.into());
        self
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.query.push((key.into(), value.into()));
        self
    }

    /// Sets a header for this request, overriding any client default of
    /// the same name.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.extra_headers.insert(key.into(), value.into());
        self
    }

    /// Finishes the request, validating it.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if validation fails.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        self.request.verify()?;
        Ok(self.request)
    }
}
