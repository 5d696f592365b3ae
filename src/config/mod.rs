//! Configuration types for the MyRxx API client.
//!
//! This module provides the core configuration types used to initialize
//! the client for communication with the MyRxx API.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`MyRxxConfig`]: The main configuration struct holding all client settings
//! - [`MyRxxConfigBuilder`]: A builder for constructing [`MyRxxConfig`] instances
//! - [`ClientId`]: A validated client ID newtype
//! - [`ClientSecret`]: A validated client secret newtype with masked debug output
//! - [`RedirectUri`]: A validated OAuth redirect URI
//! - [`ServerMode`]: The server environment to target
//!
//! # Example
//!
//! ```rust
//! use myrxx::{MyRxxConfig, ClientId, ClientSecret, RedirectUri, ServerMode};
//!
//! let config = MyRxxConfig::builder()
//!     .client_id(ClientId::new("my-client-id").unwrap())
//!     .client_secret(ClientSecret::new("my-secret").unwrap())
//!     .redirect_uri(RedirectUri::new("http://localhost:3001/oauth2/callback").unwrap())
//!     .mode(ServerMode::Local)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.server_url(), "http://myrxx.dev");
//! ```

mod mode;
mod newtypes;

pub use mode::{ServerMode, LOCAL_SERVER_URL, PRODUCTION_SERVER_URL, TEST_SERVER_URL};
pub use newtypes::{ClientId, ClientSecret, RedirectUri};

use crate::error::ConfigError;

/// Configuration for the MyRxx API client.
///
/// This struct holds the credentials and environment selection needed for
/// client operations. The base URL is resolved once at build time from the
/// configured [`ServerMode`], or from an explicit override (useful for
/// pointing the client at a proxy or a test server).
///
/// # Thread Safety
///
/// `MyRxxConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
///
/// # Example
///
/// ```rust
/// use myrxx::{MyRxxConfig, ClientId, ClientSecret, RedirectUri};
///
/// let config = MyRxxConfig::builder()
///     .client_id(ClientId::new("id").unwrap())
///     .client_secret(ClientSecret::new("secret").unwrap())
///     .redirect_uri(RedirectUri::new("https://myapp.example.com/cb").unwrap())
///     .build()
///     .unwrap();
///
/// // Production is the default mode
/// assert_eq!(config.server_url(), "https://myrxx.com");
/// ```
#[derive(Clone, Debug)]
pub struct MyRxxConfig {
    client_id: ClientId,
    client_secret: ClientSecret,
    redirect_uri: RedirectUri,
    mode: ServerMode,
    server_url: Option<String>,
}

impl MyRxxConfig {
    /// Creates a new builder for constructing a `MyRxxConfig`.
    #[must_use]
    pub fn builder() -> MyRxxConfigBuilder {
        MyRxxConfigBuilder::new()
    }

    /// Returns the client ID.
    #[must_use]
    pub const fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    /// Returns the client secret.
    #[must_use]
    pub const fn client_secret(&self) -> &ClientSecret {
        &self.client_secret
    }

    /// Returns the OAuth redirect URI.
    #[must_use]
    pub const fn redirect_uri(&self) -> &RedirectUri {
        &self.redirect_uri
    }

    /// Returns the configured server mode.
    #[must_use]
    pub const fn mode(&self) -> ServerMode {
        self.mode
    }

    /// Returns the base URL for all requests.
    ///
    /// This is the explicit override if one was set, otherwise the URL
    /// derived from the configured [`ServerMode`].
    #[must_use]
    pub fn server_url(&self) -> &str {
        self.server_url
            .as_deref()
            .unwrap_or_else(|| self.mode.base_url())
    }
}

// Verify MyRxxConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<MyRxxConfig>();
};

/// Builder for constructing [`MyRxxConfig`] instances.
///
/// Required fields are `client_id`, `client_secret`, and `redirect_uri`.
/// The mode defaults to [`ServerMode::Production`].
///
/// # Example
///
/// ```rust
/// use myrxx::{MyRxxConfig, ClientId, ClientSecret, RedirectUri, ServerMode};
///
/// let config = MyRxxConfig::builder()
///     .client_id(ClientId::new("id").unwrap())
///     .client_secret(ClientSecret::new("secret").unwrap())
///     .redirect_uri(RedirectUri::new("http://localhost:3001/cb").unwrap())
///     .mode(ServerMode::Test)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MyRxxConfigBuilder {
    client_id: Option<ClientId>,
    client_secret: Option<ClientSecret>,
    redirect_uri: Option<RedirectUri>,
    mode: Option<ServerMode>,
    server_url: Option<String>,
}

impl MyRxxConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the client ID (required).
    #[must_use]
    pub fn client_id(mut self, id: ClientId) -> Self {
        self.client_id = Some(id);
        self
    }

    /// Sets the client secret (required).
    #[must_use]
    pub fn client_secret(mut self, secret: ClientSecret) -> Self {
        self.client_secret = Some(secret);
        self
    }

    /// Sets the OAuth redirect URI (required).
    #[must_use]
    pub fn redirect_uri(mut self, uri: RedirectUri) -> Self {
        self.redirect_uri = Some(uri);
        self
    }

    /// Sets the server mode. Defaults to [`ServerMode::Production`].
    #[must_use]
    pub const fn mode(mut self, mode: ServerMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Overrides the base URL derived from the server mode.
    ///
    /// Intended for tests and proxy setups. A trailing slash is stripped.
    #[must_use]
    pub fn server_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.server_url = Some(url.trim_end_matches('/').to_string());
        self
    }

    /// Builds the [`MyRxxConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `client_id`,
    /// `client_secret`, or `redirect_uri` are not set.
    pub fn build(self) -> Result<MyRxxConfig, ConfigError> {
        let client_id = self
            .client_id
            .ok_or(ConfigError::MissingRequiredField { field: "client_id" })?;
        let client_secret = self
            .client_secret
            .ok_or(ConfigError::MissingRequiredField {
                field: "client_secret",
            })?;
        let redirect_uri = self
            .redirect_uri
            .ok_or(ConfigError::MissingRequiredField {
                field: "redirect_uri",
            })?;

        Ok(MyRxxConfig {
            client_id,
            client_secret,
            redirect_uri,
            mode: self.mode.unwrap_or_default(),
            server_url: self.server_url,
        })
    }
}
