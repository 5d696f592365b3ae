//! OAuth token exchanges for the MyRxx API.
//!
//! The MyRxx service authenticates an office/provider principal through
//! an OAuth2-style token exchange. Three grants are available, all built
//! on the same password-grant wire shape:
//!
//! - [`exchange_password`]: for providers already registered server-side
//! - [`exchange_office_credentials`]: registers and authenticates an
//!   office/provider pair in one step
//! - [`exchange_office_code`]: joins a provider to an existing office by
//!   its application code
//!
//! A caller decides between the password and credentials-style grants by
//! asking [`Api::requires_password`](crate::Api::requires_password),
//! which performs the provider-existence lookup.

mod error;
mod password;

pub use error::AuthError;
pub use password::{exchange_office_code, exchange_office_credentials, exchange_password};
