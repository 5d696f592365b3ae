//! The provider resource.

use serde_json::{Map, Value};

use crate::rest::attributes::{declared_map, decode_string, ApiObject, AttributeError};

/// A prescribing provider (the authenticated user of the client).
///
/// Serialization nests the identity fields (`first_name`, `last_name`,
/// `email`) under a `user_attributes` mapping, which is the shape the
/// registration grants expect. Blank identity values are omitted from
/// the nested mapping rather than sent as nulls.
///
/// # Example
///
/// ```rust
/// use myrxx::{ApiObject, Provider};
///
/// let provider = Provider {
///     email: Some("provider@example.com".to_string()),
///     accreditation: Some("MD".to_string()),
///     ..Provider::default()
/// };
/// let map = provider.to_map();
/// assert_eq!(map["user_attributes"]["email"], "provider@example.com");
/// assert!(map.get("email").is_none());
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Provider {
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
    /// Email address, also the login username.
    pub email: Option<String>,
    /// Twitter handle.
    pub twitter: Option<String>,
    /// Facebook display name.
    pub facebook_name: Option<String>,
    /// Facebook profile link.
    pub facebook_link: Option<String>,
    /// Name prefix (e.g., "Dr.").
    pub prefix: Option<String>,
    /// Name suffix.
    pub suffix: Option<String>,
    /// Professional accreditation (e.g., "MD").
    pub accreditation: Option<String>,
}

/// The identity fields relocated under `user_attributes` on serialization.
const USER_ATTRIBUTE_FIELDS: [&str; 3] = ["first_name", "last_name", "email"];

impl ApiObject for Provider {
    const NAME: &'static str = "Provider";
    const FIELDS: &'static [&'static str] = &[
        "first_name",
        "last_name",
        "email",
        "twitter",
        "facebook_name",
        "facebook_link",
        "prefix",
        "suffix",
        "accreditation",
    ];

    fn set_field(&mut self, field: &str, value: &Value) -> Result<(), AttributeError> {
        let slot = match field {
            "first_name" => &mut self.first_name,
            "last_name" => &mut self.last_name,
            "email" => &mut self.email,
            "twitter" => &mut self.twitter,
            "facebook_name" => &mut self.facebook_name,
            "facebook_link" => &mut self.facebook_link,
            "prefix" => &mut self.prefix,
            "suffix" => &mut self.suffix,
            "accreditation" => &mut self.accreditation,
            _ => {
                return Err(AttributeError::UnknownField {
                    entity: Self::NAME,
                    field: field.to_string(),
                })
            }
        };
        *slot = decode_string(Self::NAME, field_name(field), value)?;
        Ok(())
    }

    fn field(&self, field: &str) -> Value {
        let slot = match field {
            "first_name" => &self.first_name,
            "last_name" => &self.last_name,
            "email" => &self.email,
            "twitter" => &self.twitter,
            "facebook_name" => &self.facebook_name,
            "facebook_link" => &self.facebook_link,
            "prefix" => &self.prefix,
            "suffix" => &self.suffix,
            "accreditation" => &self.accreditation,
            _ => &None,
        };
        slot.clone().map_or(Value::Null, Value::from)
    }

    fn to_map(&self) -> Map<String, Value> {
        let mut map = declared_map(self);
        let mut user_attributes = Map::new();
        for field in USER_ATTRIBUTE_FIELDS {
            if let Some(value) = map.remove(field) {
                match value {
                    Value::String(ref s) if s.trim().is_empty() => {}
                    Value::Null => {}
                    _ => {
                        user_attributes.insert(field.to_string(), value);
                    }
                }
            }
        }
        map.insert(
            "user_attributes".to_string(),
            Value::Object(user_attributes),
        );
        map
    }
}

/// Maps a field key back to its `'static` name for error reporting.
fn field_name(field: &str) -> &'static str {
    Provider::FIELDS
        .iter()
        .find(|candidate| **candidate == field)
        .copied()
        .unwrap_or("unknown")
}
