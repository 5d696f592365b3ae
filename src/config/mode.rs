//! Server mode selection for the MyRxx API.
//!
//! The remote service runs at three fixed endpoint roots. [`ServerMode`]
//! selects between them at configuration build time; no other global state
//! is involved.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// Base URL for the local development server.
pub const LOCAL_SERVER_URL: &str = "http://myrxx.dev";

/// Base URL for the hosted test server.
pub const TEST_SERVER_URL: &str = "http://myrxx-dev.herokuapp.com";

/// Base URL for the production server.
pub const PRODUCTION_SERVER_URL: &str = "https://myrxx.com";

/// The MyRxx server to target.
///
/// Each mode maps to a fixed, distinct endpoint root. The default is
/// [`ServerMode::Production`].
///
/// # Example
///
/// ```rust
/// use myrxx::ServerMode;
///
/// assert_eq!(ServerMode::default(), ServerMode::Production);
/// assert_eq!(ServerMode::Local.base_url(), "http://myrxx.dev");
/// assert_eq!("test".parse::<ServerMode>().unwrap(), ServerMode::Test);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ServerMode {
    /// Local development server (`http://myrxx.dev`).
    Local,
    /// Hosted test server (`http://myrxx-dev.herokuapp.com`).
    Test,
    /// Production server (`https://myrxx.com`).
    #[default]
    Production,
}

impl ServerMode {
    /// Returns the base URL for this mode.
    #[must_use]
    pub const fn base_url(self) -> &'static str {
        match self {
            Self::Local => LOCAL_SERVER_URL,
            Self::Test => TEST_SERVER_URL,
            Self::Production => PRODUCTION_SERVER_URL,
        }
    }

    /// Returns the mode name as a string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Test => "test",
            Self::Production => "production",
        }
    }
}

impl fmt::Display for ServerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServerMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(Self::Local),
            "test" => Ok(Self::Test),
            "production" => Ok(Self::Production),
            _ => Err(ConfigError::InvalidServerMode {
                mode: s.to_string(),
            }),
        }
    }
}
