//! The prescribe-redirect resource.

use serde_json::Value;

use crate::rest::attributes::{decode_string, ApiObject, AttributeError};

/// The browser handoff returned when starting a new prescription.
///
/// Prescribing happens in the MyRxx web interface; the client's part is
/// to fetch this redirect and send the provider's browser to its URL.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PrescribeRedirect {
    /// The web address to open.
    pub url: Option<String>,
}

impl ApiObject for PrescribeRedirect {
    const NAME: &'static str = "PrescribeRedirect";
    const FIELDS: &'static [&'static str] = &["url"];

    fn set_field(&mut self, field: &str, value: &Value) -> Result<(), AttributeError> {
        match field {
            "url" => self.url = decode_string(Self::NAME, "url", value)?,
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
            "url" => self.url.clone().map_or(Value::Null, Value::from),
            _ => Value::Null,
        }
    }
}
