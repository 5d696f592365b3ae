//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use std::fmt;

/// A validated MyRxx client ID.
///
/// This newtype ensures the client ID is non-empty and provides type safety
/// to prevent accidental misuse of raw strings.
///
/// # Example
///
/// ```rust
/// use myrxx::ClientId;
///
/// let id = ClientId::new("my-client-id").unwrap();
/// assert_eq!(id.as_ref(), "my-client-id");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientId(String);

impl ClientId {
    /// Creates a new validated client ID.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyClientId`] if the ID is empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ConfigError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ConfigError::EmptyClientId);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for ClientId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A validated MyRxx client secret.
///
/// This newtype ensures the secret is non-empty and masks its value
/// in debug output to prevent accidental exposure in logs.
///
/// # Security
///
/// The `Debug` implementation masks the secret value, displaying only
/// `ClientSecret(*****)` instead of the actual secret.
///
/// # Example
///
/// ```rust
/// use myrxx::ClientSecret;
///
/// let secret = ClientSecret::new("my-secret").unwrap();
/// assert_eq!(format!("{:?}", secret), "ClientSecret(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ClientSecret(String);

impl ClientSecret {
    /// Creates a new validated client secret.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyClientSecret`] if the secret is empty.
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(ConfigError::EmptyClientSecret);
        }
        Ok(Self(secret))
    }
}

impl AsRef<str> for ClientSecret {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ClientSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClientSecret(*****)")
    }
}

/// A validated OAuth redirect URI.
///
/// This newtype validates that the URI has a proper format with a scheme
/// and a non-empty host.
///
/// # Example
///
/// ```rust
/// use myrxx::RedirectUri;
///
/// let uri = RedirectUri::new("http://localhost:3001/oauth2/callback").unwrap();
/// assert_eq!(uri.scheme(), "http");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RedirectUri {
    uri: String,
    scheme_end: usize,
}

impl RedirectUri {
    /// Creates a new validated redirect URI.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRedirectUri`] if the URI is invalid.
    pub fn new(uri: impl Into<String>) -> Result<Self, ConfigError> {
        let uri = uri.into();
        let uri = uri.trim().to_string();

        let scheme_end = uri
            .find("://")
            .ok_or_else(|| ConfigError::InvalidRedirectUri { uri: uri.clone() })?;

        let scheme = &uri[..scheme_end];
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::InvalidRedirectUri { uri: uri.clone() });
        }

        // Host must be non-empty
        let host_start = scheme_end + 3;
        if host_start >= uri.len() {
            return Err(ConfigError::InvalidRedirectUri { uri });
        }
        let remainder = &uri[host_start..];
        let host_end = remainder.find([':', '/', '?', '#']).unwrap_or(remainder.len());
        if remainder[..host_end].is_empty() {
            return Err(ConfigError::InvalidRedirectUri { uri });
        }

        Ok(Self { uri, scheme_end })
    }

    /// Returns the URI scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.uri[..self.scheme_end]
    }
}

impl AsRef<str> for RedirectUri {
    fn as_ref(&self) -> &str {
        &self.uri
    }
}
