//! The HTTP client behind every MyRxx API exchange.

use std::collections::HashMap;

use crate::clients::errors::{HttpError, HttpResponseError};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::config::MyRxxConfig;

/// Crate version, reported in the User-Agent header.
pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Async HTTP client for the MyRxx API.
///
/// The client resolves its base URI once from the configuration (server
/// mode or explicit override), carries the default headers, encodes JSON
/// bodies, and parses JSON responses. Each call is one request/response
/// exchange; there is no retry or caching layer.
///
/// Authentication is per request: callers attach an `Authorization`
/// header through the [`HttpRequest`] builder, so the same client serves
/// the unauthenticated provider lookup and the token-bearing calls.
///
/// A non-2xx response becomes [`HttpError::Response`] with the parsed
/// body retained.
#[derive(Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    base_uri: String,
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a client for the given configuration.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be constructed,
    /// which only happens if TLS initialization fails.
    #[must_use]
    pub fn new(config: &MyRxxConfig) -> Self {
        let base_uri = config.server_url().trim_end_matches('/').to_string();

        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent = format!("MyRxx API Client v{CLIENT_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_uri,
            default_headers,
        }
    }

    /// Returns the resolved base URI.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Returns the headers sent with every request.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Sends a request and parses the response.
    ///
    /// The response body is parsed as JSON; an empty or unparseable body
    /// becomes an empty mapping rather than a failure, since some
    /// endpoints answer with no payload.
    ///
    /// # Errors
    ///
    /// - [`HttpError::InvalidRequest`] if the request fails validation
    /// - [`HttpError::Network`] if the exchange never completes
    /// - [`HttpError::Response`] for a non-2xx status
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = format!("{}/{}", self.base_uri, request.path);

        tracing::debug!(method = %request.http_method, path = %request.path, "sending request");

        let mut builder = match request.http_method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Put => self.client.put(&url),
        };

        for (key, value) in &self.default_headers {
            if !request.extra_headers.contains_key(key) {
                builder = builder.header(key, value);
            }
        }
        for (key, value) in &request.extra_headers {
            builder = builder.header(key, value);
        }

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        if let Some(body) = &request.body {
            builder = builder
                .header("Content-Type", "application/json")
                .body(body.to_string());
        }

        let raw = builder.send().await?;

        let code = raw.status().as_u16();
        let headers = Self::collect_headers(raw.headers());
        let text = raw.text().await.unwrap_or_default();

        let body = serde_json::from_str(&text).unwrap_or_else(|_| serde_json::json!({}));
        let response = HttpResponse::new(code, headers, body);

        if response.is_ok() {
            return Ok(response);
        }

        let error_reference = response.request_id().map(String::from);
        Err(HttpError::Response(HttpResponseError {
            code: response.code,
            body: response.body,
            error_reference,
        }))
    }

    fn collect_headers(headers: &reqwest::header::HeaderMap) -> HashMap<String, Vec<String>> {
        let mut collected: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            collected
                .entry(name.as_str().to_lowercase())
                .or_default()
                .push(value.to_str().unwrap_or_default().to_string());
        }
        collected
    }
}
