//! Declarative attribute mapping between JSON mappings and typed entities.
//!
//! Every MyRxx resource type is built on the [`ApiObject`] trait: the type
//! declares an ordered field set once, and the trait converts between a
//! JSON mapping and a typed instance in both directions.
//!
//! # Closed-World Decoding
//!
//! Assignment rejects any key outside the declared field set with
//! [`AttributeError::UnknownField`]. An unknown key signals a schema
//! mismatch between client and server and is always fatal. Values that
//! cannot decode into the field's type fail with
//! [`AttributeError::InvalidValue`].
//!
//! # Field Order
//!
//! Serialization emits every declared field in declaration order, with
//! `null` for unset values. The produced mapping always has exactly the
//! declared field set as keys unless a type override changes the entries
//! (see [`Provider`](crate::rest::resources::Provider),
//! [`Patient`](crate::rest::resources::Patient), and
//! [`Prescription`](crate::rest::resources::Prescription)).
//!
//! # Example
//!
//! ```rust
//! use myrxx::{ApiObject, Office};
//! use serde_json::json;
//!
//! let values = json!({"name": "Clinic A"});
//! let office = Office::from_map(values.as_object().unwrap()).unwrap();
//! assert_eq!(office.name.as_deref(), Some("Clinic A"));
//!
//! let map = office.to_map();
//! assert_eq!(map["name"], json!("Clinic A"));
//! assert_eq!(map["address"], json!(null));
//! ```

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors that can occur while mapping JSON values onto entities.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AttributeError {
    /// A mapping contained a key outside the entity's declared field set.
    ///
    /// This signals a schema mismatch between client and server and is
    /// always fatal.
    #[error("Unknown field '{field}' for {entity}.")]
    UnknownField {
        /// The entity type being assigned.
        entity: &'static str,
        /// The unrecognized key.
        field: String,
    },

    /// A declared field received a value it cannot decode.
    #[error("Invalid value for {entity}.{field}: expected {expected}.")]
    InvalidValue {
        /// The entity type being assigned.
        entity: &'static str,
        /// The field that rejected the value.
        field: &'static str,
        /// Description of the expected value shape.
        expected: &'static str,
    },
}

/// A typed record mirroring one remote resource shape.
///
/// Implementors declare their field set in [`ApiObject::FIELDS`] and route
/// per-field reads and writes through [`ApiObject::field`] and
/// [`ApiObject::set_field`]. The trait supplies hydration
/// ([`ApiObject::from_map`], [`ApiObject::assign`]) and serialization
/// ([`ApiObject::to_map`]) on top.
///
/// Types with custom hydration or serialization override `assign` or
/// `to_map` and delegate the base behavior to [`assign_declared`] and
/// [`declared_map`].
pub trait ApiObject: Default {
    /// The entity name used in error messages (e.g., "Office").
    const NAME: &'static str;

    /// The ordered field set declared for this type.
    ///
    /// The set is fixed at definition time and identical for every
    /// instance of the type.
    const FIELDS: &'static [&'static str];

    /// Assigns one declared field from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`AttributeError::UnknownField`] if `field` is not declared,
    /// or [`AttributeError::InvalidValue`] if the value cannot decode into
    /// the field's type.
    fn set_field(&mut self, field: &str, value: &Value) -> Result<(), AttributeError>;

    /// Reads one declared field as a JSON value (`null` when unset).
    fn field(&self, field: &str) -> Value;

    /// Hydrates a new instance from a JSON mapping.
    ///
    /// # Errors
    ///
    /// Returns [`AttributeError`] if the mapping contains an unknown key
    /// or an ill-typed value.
    fn from_map(values: &Map<String, Value>) -> Result<Self, AttributeError>
    where
        Self: Sized,
    {
        let mut object = Self::default();
        object.assign(values)?;
        Ok(object)
    }

    /// Assigns a JSON mapping onto this instance.
    ///
    /// Fields absent from the mapping keep their current values, so an
    /// existing instance can be rehydrated from a later response.
    ///
    /// # Errors
    ///
    /// Returns [`AttributeError`] if the mapping contains an unknown key
    /// or an ill-typed value.
    fn assign(&mut self, values: &Map<String, Value>) -> Result<(), AttributeError> {
        assign_declared(self, values)
    }

    /// Serializes this instance to a JSON mapping.
    ///
    /// Emits every declared field in declaration order, `null` for unset
    /// values.
    #[must_use]
    fn to_map(&self) -> Map<String, Value> {
        declared_map(self)
    }
}

/// Assigns a mapping onto an object using the declared field set.
///
/// This is the base behavior of [`ApiObject::assign`], exposed so type
/// overrides can pre-process the mapping and then delegate.
///
/// # Errors
///
/// Returns [`AttributeError::UnknownField`] for keys outside the declared
/// field set; forwards [`AttributeError::InvalidValue`] from field setters.
pub fn assign_declared<T: ApiObject>(
    object: &mut T,
    values: &Map<String, Value>,
) -> Result<(), AttributeError> {
    for (key, value) in values {
        if !T::FIELDS.contains(&key.as_str()) {
            return Err(AttributeError::UnknownField {
                entity: T::NAME,
                field: key.clone(),
            });
        }
        object.set_field(key, value)?;
    }
    Ok(())
}

/// Serializes an object's declared fields in declaration order.
///
/// This is the base behavior of [`ApiObject::to_map`], exposed so type
/// overrides can delegate and then transform the result.
#[must_use]
pub fn declared_map<T: ApiObject>(object: &T) -> Map<String, Value> {
    let mut map = Map::new();
    for field in T::FIELDS {
        map.insert((*field).to_string(), object.field(field));
    }
    map
}

/// Decodes an optional string field.
pub(crate) fn decode_string(
    entity: &'static str,
    field: &'static str,
    value: &Value,
) -> Result<Option<String>, AttributeError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        _ => Err(AttributeError::InvalidValue {
            entity,
            field,
            expected: "a string or null",
        }),
    }
}

/// Decodes an optional boolean field.
pub(crate) fn decode_bool(
    entity: &'static str,
    field: &'static str,
    value: &Value,
) -> Result<Option<bool>, AttributeError> {
    match value {
        Value::Null => Ok(None),
        Value::Bool(b) => Ok(Some(*b)),
        _ => Err(AttributeError::InvalidValue {
            entity,
            field,
            expected: "a boolean or null",
        }),
    }
}

/// Decodes an optional unsigned integer field (used for server ids).
pub(crate) fn decode_u64(
    entity: &'static str,
    field: &'static str,
    value: &Value,
) -> Result<Option<u64>, AttributeError> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) if n.as_u64().is_some() => Ok(n.as_u64()),
        _ => Err(AttributeError::InvalidValue {
            entity,
            field,
            expected: "an unsigned integer or null",
        }),
    }
}

/// Decodes an optional signed integer field.
pub(crate) fn decode_i64(
    entity: &'static str,
    field: &'static str,
    value: &Value,
) -> Result<Option<i64>, AttributeError> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) if n.as_i64().is_some() => Ok(n.as_i64()),
        _ => Err(AttributeError::InvalidValue {
            entity,
            field,
            expected: "an integer or null",
        }),
    }
}

/// Decodes an optional list-of-strings field.
pub(crate) fn decode_string_list(
    entity: &'static str,
    field: &'static str,
    value: &Value,
) -> Result<Option<Vec<String>>, AttributeError> {
    match value {
        Value::Null => Ok(None),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.clone()),
                _ => Err(AttributeError::InvalidValue {
                    entity,
                    field,
                    expected: "an array of strings or null",
                }),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some),
        _ => Err(AttributeError::InvalidValue {
            entity,
            field,
            expected: "an array of strings or null",
        }),
    }
}

/// Decodes an optional RFC 3339 timestamp field.
pub(crate) fn decode_datetime(
    entity: &'static str,
    field: &'static str,
    value: &Value,
) -> Result<Option<DateTime<Utc>>, AttributeError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(|_| AttributeError::InvalidValue {
                entity,
                field,
                expected: "an RFC 3339 timestamp or null",
            }),
        _ => Err(AttributeError::InvalidValue {
            entity,
            field,
            expected: "an RFC 3339 timestamp or null",
        }),
    }
}
