//! Error types for the MyRxx API client.
//!
//! This module contains [`ConfigError`] for configuration validation failures
//! and [`ApiError`], the unified error type returned by [`Api`](crate::Api)
//! operations.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. API operations return `Result<T, ApiError>`, which
//! aggregates the transport, authentication, and attribute-mapping error
//! layers.
//!
//! # Example
//!
//! ```rust
//! use myrxx::{ClientId, ConfigError};
//!
//! let result = ClientId::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyClientId)));
//! ```

use thiserror::Error;

use crate::auth::oauth::AuthError;
use crate::clients::HttpError;
use crate::rest::AttributeError;

/// Errors that can occur during client configuration.
///
/// This enum represents all possible errors that can occur when creating
/// or validating configuration types. Each variant provides a clear,
/// actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Client ID cannot be empty.
    #[error("Client ID cannot be empty. Please provide a valid MyRxx client ID.")]
    EmptyClientId,

    /// Client secret cannot be empty.
    #[error("Client secret cannot be empty. Please provide a valid MyRxx client secret.")]
    EmptyClientSecret,

    /// Redirect URI is invalid.
    #[error("Invalid redirect URI '{uri}'. Please provide a valid URI with scheme (e.g., 'https://myapp.example.com/oauth2/callback').")]
    InvalidRedirectUri {
        /// The invalid URI that was provided.
        uri: String,
    },

    /// Server mode is invalid.
    #[error("Invalid server mode '{mode}'. Expected one of: 'local', 'test', 'production'.")]
    InvalidServerMode {
        /// The invalid mode string that was provided.
        mode: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}

/// Unified error type for API operations.
///
/// This enum aggregates the error layers of the crate (configuration,
/// transport, authentication, attribute mapping) plus client-level
/// failures that do not belong to any collaborator.
///
/// # Example
///
/// ```rust,ignore
/// use myrxx::ApiError;
///
/// match api.office().await {
///     Ok(office) => println!("Office: {:?}", office.name),
///     Err(ApiError::MissingAccessToken) => println!("Log in first"),
///     Err(e) => println!("Request failed: {e}"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum ApiError {
    /// A configuration value failed validation.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An HTTP-level error occurred.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// A token exchange failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// A mapping could not be decoded into an entity.
    #[error(transparent)]
    Attribute(#[from] AttributeError),

    /// An authenticated call was made before any login operation.
    #[error("No access token is set. Call one of the login operations before making API requests.")]
    MissingAccessToken,

    /// A patient-scoped call was made with an unsaved patient.
    #[error("Patient has no id. Save the patient before calling {operation}.")]
    MissingPatientId {
        /// The operation that required a saved patient.
        operation: &'static str,
    },

    /// The response body did not have the documented shape.
    #[error("Unexpected response shape: expected {expected}.")]
    UnexpectedResponse {
        /// Description of the expected response shape.
        expected: &'static str,
    },
}

// Verify ApiError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiError>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_client_id_error_message() {
        let error = ConfigError::EmptyClientId;
        let message = error.to_string();
        assert!(message.contains("Client ID cannot be empty"));
        assert!(message.contains("valid MyRxx client ID"));
    }

    #[test]
    fn test_invalid_redirect_uri_error_message() {
        let error = ConfigError::InvalidRedirectUri {
            uri: "not a uri".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("not a uri"));
        assert!(message.contains("scheme"));
    }

    #[test]
    fn test_missing_required_field_error_message() {
        let error = ConfigError::MissingRequiredField {
            field: "client_id",
        };
        let message = error.to_string();
        assert!(message.contains("client_id"));
        assert!(message.contains("must be set"));
    }

    #[test]
    fn test_missing_patient_id_names_operation() {
        let error = ApiError::MissingPatientId {
            operation: "prescribe_patient",
        };
        assert!(error.to_string().contains("prescribe_patient"));
    }

    #[test]
    fn test_errors_implement_std_error() {
        let config_error: &dyn std::error::Error = &ConfigError::EmptyClientId;
        let _ = config_error;

        let api_error: &dyn std::error::Error = &ApiError::MissingAccessToken;
        let _ = api_error;
    }
}
