//! The workout resource.

use serde_json::Value;

use crate::rest::attributes::{
    decode_i64, decode_string, decode_string_list, decode_u64, ApiObject, AttributeError,
};

/// An exercise program attached to a prescription.
///
/// Workouts are read-only from the client's perspective; they arrive
/// nested inside [`Prescription`](crate::Prescription) responses.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Workout {
    /// Server-assigned id.
    pub id: Option<u64>,
    /// Workout name.
    pub name: Option<String>,
    /// Difficulty rating.
    pub difficulty: Option<i64>,
    /// Estimated time to complete, in minutes.
    pub time_to_complete: Option<i64>,
    /// Body areas the workout targets.
    pub body_area_names: Option<Vec<String>>,
    /// Categories the workout belongs to.
    pub category_names: Option<Vec<String>>,
    /// Equipment the workout requires.
    pub equipment_names: Option<Vec<String>>,
    /// Exercises the workout includes.
    pub exercise_names: Option<Vec<String>>,
}

impl ApiObject for Workout {
    const NAME: &'static str = "Workout";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "name",
        "difficulty",
        "time_to_complete",
        "body_area_names",
        "category_names",
        "equipment_names",
        "exercise_names",
    ];

    fn set_field(&mut self, field: &str, value: &Value) -> Result<(), AttributeError> {
        match field {
            "id" => self.id = decode_u64(Self::NAME, "id", value)?,
            "name" => self.name = decode_string(Self::NAME, "name", value)?,
            "difficulty" => self.difficulty = decode_i64(Self::NAME, "difficulty", value)?,
            "time_to_complete" => {
                self.time_to_complete = decode_i64(Self::NAME, "time_to_complete", value)?;
            }
            "body_area_names" => {
                self.body_area_names = decode_string_list(Self::NAME, "body_area_names", value)?;
            }
            "category_names" => {
                self.category_names = decode_string_list(Self::NAME, "category_names", value)?;
            }
            "equipment_names" => {
                self.equipment_names = decode_string_list(Self::NAME, "equipment_names", value)?;
            }
            "exercise_names" => {
                self.exercise_names = decode_string_list(Self::NAME, "exercise_names", value)?;
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
            "difficulty" => self.difficulty.map_or(Value::Null, Value::from),
            "time_to_complete" => self.time_to_complete.map_or(Value::Null, Value::from),
            "body_area_names" => self.body_area_names.clone().map_or(Value::Null, Value::from),
            "category_names" => self.category_names.clone().map_or(Value::Null, Value::from),
            "equipment_names" => self.equipment_names.clone().map_or(Value::Null, Value::from),
            "exercise_names" => self.exercise_names.clone().map_or(Value::Null, Value::from),
            _ => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_hydrates_lists_and_scalars() {
        let values = json!({
            "id": 11,
            "name": "Lower Back Basics",
            "difficulty": 2,
            "time_to_complete": 20,
            "body_area_names": ["lower back", "core"],
            "exercise_names": ["bridge", "plank"]
        });
        let workout = Workout::from_map(values.as_object().unwrap()).unwrap();
        assert_eq!(workout.id, Some(11));
        assert_eq!(workout.difficulty, Some(2));
        assert_eq!(
            workout.body_area_names.as_deref(),
            Some(["lower back".to_string(), "core".to_string()].as_slice())
        );
        assert!(workout.category_names.is_none());
    }

    #[test]
    fn test_rejects_non_list_names() {
        let values = json!({"equipment_names": "bands"});
        let result = Workout::from_map(values.as_object().unwrap());
        assert!(matches!(
            result,
            Err(AttributeError::InvalidValue { field: "equipment_names", .. })
        ));
    }
}
