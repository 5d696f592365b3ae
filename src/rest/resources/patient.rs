//! The patient resource.

use serde_json::{Map, Value};

use crate::api::Api;
use crate::error::ApiError;
use crate::rest::attributes::{
    assign_declared, declared_map, decode_bool, decode_string, decode_u64, ApiObject,
    AttributeError,
};
use crate::rest::persistent::{PersistentObject, SaveOutcome};
use crate::rest::resources::{PrescribeRedirect, Prescription};

/// Key some server responses use for the connection flag.
///
/// Assignment normalizes it to `is_connected` before decoding.
const IS_CONNECTED_QUESTION_KEY: &str = "is_connected?";

/// A patient record belonging to the authenticated office.
///
/// The patient is the one entity the client persists: it carries a
/// server-assigned id (accepted on assignment, never serialized) and a
/// per-instance validation error list populated when a save is rejected.
///
/// # Example
///
/// ```rust,ignore
/// let mut patient = api.new_patient(&json!({
///     "first_name": "Jamie",
///     "email": "jamie@example.com"
/// }))?;
/// match patient.save(&api).await? {
///     SaveOutcome::Saved => println!("saved as {:?}", patient.id()),
///     SaveOutcome::Rejected => println!("rejected: {:?}", patient.errors()),
/// }
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Patient {
    /// Server-assigned id.
    pub id: Option<u64>,
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Whether the patient has connected their own MyRxx account.
    pub is_connected: Option<bool>,
    /// The caller's identifier for the patient in its own system.
    pub external_id: Option<String>,
    /// Validation messages from the most recent rejected save.
    errors: Vec<String>,
}

impl ApiObject for Patient {
    const NAME: &'static str = "Patient";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "first_name",
        "last_name",
        "email",
        "is_connected",
        "external_id",
    ];

    fn set_field(&mut self, field: &str, value: &Value) -> Result<(), AttributeError> {
        match field {
            "id" => self.id = decode_u64(Self::NAME, "id", value)?,
            "first_name" => self.first_name = decode_string(Self::NAME, "first_name", value)?,
            "last_name" => self.last_name = decode_string(Self::NAME, "last_name", value)?,
            "email" => self.email = decode_string(Self::NAME, "email", value)?,
            "is_connected" => {
                self.is_connected = decode_bool(Self::NAME, "is_connected", value)?;
            }
            "external_id" => self.external_id = decode_string(Self::NAME, "external_id", value)?,
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
            "first_name" => self.first_name.clone().map_or(Value::Null, Value::from),
            "last_name" => self.last_name.clone().map_or(Value::Null, Value::from),
            "email" => self.email.clone().map_or(Value::Null, Value::from),
            "is_connected" => self.is_connected.map_or(Value::Null, Value::from),
            "external_id" => self.external_id.clone().map_or(Value::Null, Value::from),
            _ => Value::Null,
        }
    }

    /// Assigns a mapping, normalizing the server's `is_connected?` key to
    /// `is_connected` first.
    fn assign(&mut self, values: &Map<String, Value>) -> Result<(), AttributeError> {
        if values.contains_key(IS_CONNECTED_QUESTION_KEY) {
            let mut normalized = values.clone();
            if let Some(value) = normalized.remove(IS_CONNECTED_QUESTION_KEY) {
                normalized.insert("is_connected".to_string(), value);
            }
            assign_declared(self, &normalized)
        } else {
            assign_declared(self, values)
        }
    }

    /// Serializes the patient for write requests.
    ///
    /// The id is server-managed, so it is dropped from the mapping; the
    /// request path carries it instead.
    fn to_map(&self) -> Map<String, Value> {
        let mut map = declared_map(self);
        map.remove("id");
        map
    }
}

impl PersistentObject for Patient {
    fn id(&self) -> Option<u64> {
        self.id
    }

    fn errors(&self) -> &[String] {
        &self.errors
    }

    fn set_errors(&mut self, errors: Vec<String>) {
        self.errors = errors;
    }
}

impl Patient {
    /// Persists the patient through the API.
    ///
    /// Creates the patient if it has no id, updates it otherwise. On
    /// success the instance is rehydrated from the response and
    /// [`SaveOutcome::Saved`] is returned; a validation rejection records
    /// the messages in [`PersistentObject::errors`] and returns
    /// [`SaveOutcome::Rejected`].
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] for any failure other than a validation
    /// rejection: missing login, network errors, or non-validation server
    /// errors.
    pub async fn save(&mut self, api: &Api) -> Result<SaveOutcome, ApiError> {
        api.save_patient(self).await
    }

    /// Starts a new prescription for this patient.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingPatientId`] if the patient has not been
    /// saved, or any [`ApiError`] the underlying request produces.
    pub async fn prescribe(&self, api: &Api) -> Result<PrescribeRedirect, ApiError> {
        api.prescribe_patient(self).await
    }

    /// Fetches the patient's prescriptions.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingPatientId`] if the patient has not been
    /// saved, or any [`ApiError`] the underlying request produces.
    pub async fn prescriptions(&self, api: &Api) -> Result<Vec<Prescription>, ApiError> {
        api.patient_prescriptions(self).await
    }
}
