//! HTTP client types for MyRxx API communication.
//!
//! This module provides the foundational HTTP layer for making requests to
//! the MyRxx API. It handles request/response processing and translates
//! non-2xx responses into structured errors with their parsed bodies.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`HttpClient`]: The async HTTP client for API communication
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A parsed response from the API
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PUT)
//! - [`HttpError`]: Unified error type for HTTP operations
//!
//! # Example
//!
//! ```rust,ignore
//! use myrxx::clients::{HttpClient, HttpRequest, HttpMethod};
//!
//! let client = HttpClient::new(&config);
//!
//! let request = HttpRequest::builder(HttpMethod::Get, "api/v2/office")
//!     .header("Authorization", "Bearer token")
//!     .build()
//!     .unwrap();
//!
//! let response = client.request(request).await?;
//! ```
//!
//! # Failure Behavior
//!
//! The client performs exactly one request per call. There is no retry,
//! backoff, or caching layer; every failure surfaces to the caller on
//! first occurrence.

mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{HttpError, HttpResponseError, InvalidHttpRequestError};
pub use http_client::{HttpClient, CLIENT_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;
