//! The office resource.

use serde_json::Value;

use crate::rest::attributes::{decode_bool, decode_string, decode_u64, ApiObject, AttributeError};

/// A practice location registered with the MyRxx service.
///
/// The office identifies the practice an authenticated provider works
/// from. Its `application_code` decides which credentials-style login
/// grant applies: a blank code registers the office as part of the
/// grant, a present code joins the provider to the existing office.
///
/// # Example
///
/// ```rust
/// use myrxx::{ApiObject, Office};
///
/// let office = Office {
///     name: Some("Clinic A".to_string()),
///     city: Some("Portland".to_string()),
///     ..Office::default()
/// };
/// assert_eq!(office.to_map()["name"], "Clinic A");
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Office {
    /// Server-assigned id.
    pub id: Option<u64>,
    /// Practice name.
    pub name: Option<String>,
    /// Street address.
    pub address: Option<String>,
    /// Second address line.
    pub address2: Option<String>,
    /// City.
    pub city: Option<String>,
    /// State or region.
    pub state: Option<String>,
    /// Postal code.
    pub zip_code: Option<String>,
    /// Whether patients are shared between the office's providers.
    pub share_patients: Option<bool>,
    /// Registration code identifying the office to joining providers.
    pub application_code: Option<String>,
}

impl ApiObject for Office {
    const NAME: &'static str = "Office";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "name",
        "address",
        "address2",
        "city",
        "state",
        "zip_code",
        "share_patients",
        "application_code",
    ];

    fn set_field(&mut self, field: &str, value: &Value) -> Result<(), AttributeError> {
        match field {
            "id" => self.id = decode_u64(Self::NAME, "id", value)?,
            "name" => self.name = decode_string(Self::NAME, "name", value)?,
            "address" => self.address = decode_string(Self::NAME, "address", value)?,
            "address2" => self.address2 = decode_string(Self::NAME, "address2", value)?,
            "city" => self.city = decode_string(Self::NAME, "city", value)?,
            "state" => self.state = decode_string(Self::NAME, "state", value)?,
            "zip_code" => self.zip_code = decode_string(Self::NAME, "zip_code", value)?,
            "share_patients" => {
                self.share_patients = decode_bool(Self::NAME, "share_patients", value)?;
            }
            "application_code" => {
                self.application_code = decode_string(Self::NAME, "application_code", value)?;
            }
            _ => {
                return Err(AttributeError::UnknownField {
                    entity: Self::NAME,
                    field: field.to_string(),
                })
            }
        }
        Ok(())
    }

    fn field(&self, field: &str) -> Value {
        match field {
            "id" => self.id.map_or(Value::Null, Value::from),
            "name" => self.name.clone().map_or(Value::Null, Value::from),
            "address" => self.address.clone().map_or(Value::Null, Value::from),
            "address2" => self.address2.clone().map_or(Value::Null, Value::from),
            "city" => self.city.clone().map_or(Value::Null, Value::from),
            "state" => self.state.clone().map_or(Value::Null, Value::from),
            "zip_code" => self.zip_code.clone().map_or(Value::Null, Value::from),
            "share_patients" => self.share_patients.map_or(Value::Null, Value::from),
            "application_code" => self
                .application_code
                .clone()
                .map_or(Value::Null, Value::from),
            _ => Value::Null,
        }
    }
}

impl Office {
    /// Returns `true` if the office has no usable application code.
    ///
    /// Offices without a code are registered server-side as part of the
    /// credentials-style login grant.
    #[must_use]
    pub fn application_code_is_blank(&self) -> bool {
        self.application_code
            .as_deref()
            .map_or(true, |code| code.trim().is_empty())
    }
}
