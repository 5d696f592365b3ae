//! REST resource layer for the MyRxx API.
//!
//! This module provides the attribute-mapping framework ([`ApiObject`]),
//! persistence semantics ([`PersistentObject`], [`SaveOutcome`]), the
//! resource types under [`resources`], and path construction for the
//! versioned API namespace.

pub mod resources;

mod attributes;
mod persistent;

pub use attributes::{assign_declared, declared_map, ApiObject, AttributeError};
pub use persistent::{PersistentObject, SaveOutcome};

pub(crate) use persistent::validation_messages;

/// The MyRxx API version this client targets.
pub const API_VERSION: &str = "2";

/// Builds a request path inside the versioned API namespace.
///
/// Every resource operation lives under `api/v{version}/`; segments are
/// joined with `/` without a leading slash, ready to append to the server
/// base URL.
///
/// # Example
///
/// ```rust
/// use myrxx::rest::path_for;
///
/// assert_eq!(path_for(&["patients"]), "api/v2/patients");
/// assert_eq!(path_for(&["patients", "17"]), "api/v2/patients/17");
/// ```
#[must_use]
pub fn path_for(segments: &[&str]) -> String {
    let mut path = format!("api/v{API_VERSION}");
    for segment in segments {
        path.push('/');
        path.push_str(segment);
    }
    path
}
