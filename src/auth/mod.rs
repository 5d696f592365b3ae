//! Authentication types for the MyRxx API client.
//!
//! This module provides [`AccessToken`], the credential attached to
//! authenticated requests, and the [`oauth`] submodule with the token
//! exchange functions.

pub mod oauth;

mod token;

pub use token::AccessToken;
