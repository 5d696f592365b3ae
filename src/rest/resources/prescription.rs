//! The prescription resource.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::rest::attributes::{
    decode_datetime, decode_string, decode_u64, ApiObject, AttributeError,
};
use crate::rest::resources::Workout;

/// A workout prescription issued to a patient.
///
/// Prescriptions arrive with their workout nested as a mapping; the
/// nested mapping hydrates into a typed [`Workout`] during assignment,
/// and nested decoding errors surface through the same
/// [`AttributeError`] channel as top-level ones.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Prescription {
    /// Server-assigned id.
    pub id: Option<u64>,
    /// Provider instructions accompanying the workout.
    pub instructions: Option<String>,
    /// When the prescription was issued.
    pub created_at: Option<DateTime<Utc>>,
    /// The prescribed workout.
    pub workout: Option<Workout>,
}

impl ApiObject for Prescription {
    const NAME: &'static str = "Prescription";
    const FIELDS: &'static [&'static str] = &["id", "instructions", "created_at", "workout"];

    fn set_field(&mut self, field: &str, value: &Value) -> Result<(), AttributeError> {
        match field {
            "id" => self.id = decode_u64(Self::NAME, "id", value)?,
            "instructions" => {
                self.instructions = decode_string(Self::NAME, "instructions", value)?;
            }
            "created_at" => self.created_at = decode_datetime(Self::NAME, "created_at", value)?,
            "workout" => match value {
                // A null workout leaves the previous value untouched
                Value::Null => {}
                Value::Object(values) => self.workout = Some(Workout::from_map(values)?),
                _ => {
                    return Err(AttributeError::InvalidValue {
                        entity: Self::NAME,
                        field: "workout",
                        expected: "a workout mapping or null",
                    })
                }
            },
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
            "instructions" => self.instructions.clone().map_or(Value::Null, Value::from),
            "created_at" => self
                .created_at
                .map_or(Value::Null, |at| Value::from(at.to_rfc3339())),
            "workout" => self
                .workout
                .as_ref()
                .map_or(Value::Null, |workout| Value::Object(workout.to_map())),
            _ => Value::Null,
        }
    }
}
