//! Server-managed entity identity and save semantics.
//!
//! Entities the MyRxx service persists (currently [`Patient`]) carry a
//! server-assigned id and a per-instance list of validation errors. The
//! [`PersistentObject`] trait adds both on top of [`ApiObject`], and
//! [`SaveOutcome`] distinguishes a successful save from a validation
//! rejection.
//!
//! A validation rejection is an HTTP error response whose body carries a
//! `message` string of newline-joined validation messages. Saving such an
//! entity records the messages on the instance and returns
//! [`SaveOutcome::Rejected`]; every other failure propagates as an error.
//!
//! [`Patient`]: crate::rest::resources::Patient

use serde_json::Value;

use crate::clients::HttpError;
use crate::error::ApiError;
use crate::rest::attributes::ApiObject;

/// The result of saving a persistent entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The server accepted the entity; its id and fields were rehydrated
    /// from the response.
    Saved,

    /// The server rejected the entity with validation errors, now
    /// recorded on the instance.
    Rejected,
}

impl SaveOutcome {
    /// Returns `true` if the save was accepted.
    #[must_use]
    pub const fn is_saved(&self) -> bool {
        matches!(self, Self::Saved)
    }
}

/// An [`ApiObject`] with server-managed identity and validation state.
pub trait PersistentObject: ApiObject {
    /// The server-assigned id, if the entity has been persisted.
    fn id(&self) -> Option<u64>;

    /// Validation messages recorded by the most recent rejected save.
    ///
    /// Empty until a save is rejected; cleared by the next accepted save.
    fn errors(&self) -> &[String];

    /// Replaces the recorded validation messages.
    fn set_errors(&mut self, errors: Vec<String>);
}

/// Extracts validation messages from a save failure, if it is one.
///
/// A validation rejection is an HTTP error response whose body has a
/// string `message` key; the string is split on newlines into individual
/// messages. Any other error returns `None` and should propagate.
#[must_use]
pub(crate) fn validation_messages(error: &ApiError) -> Option<Vec<String>> {
    let ApiError::Http(HttpError::Response(response)) = error else {
        return None;
    };

    let Some(Value::String(message)) = response.body.get("message") else {
        return None;
    };

    Some(message.lines().map(str::to_string).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::HttpResponseError;
    use serde_json::json;

    fn response_error(code: u16, body: Value) -> ApiError {
        ApiError::Http(HttpError::Response(HttpResponseError {
            code,
            body,
            error_reference: None,
        }))
    }

    #[test]
    fn test_validation_messages_splits_on_newlines() {
        let error = response_error(
            422,
            json!({"message": "Last name can't be blank\nEmail can't be blank"}),
        );
        let messages = validation_messages(&error).unwrap();
        assert_eq!(
            messages,
            ["Last name can't be blank", "Email can't be blank"]
        );
    }

    #[test]
    fn test_single_message_yields_one_entry() {
        let error = response_error(422, json!({"message": "Email has already been taken"}));
        let messages = validation_messages(&error).unwrap();
        assert_eq!(messages, ["Email has already been taken"]);
    }

    #[test]
    fn test_body_without_message_key_is_not_a_rejection() {
        let error = response_error(500, json!({"error": "Internal Server Error"}));
        assert!(validation_messages(&error).is_none());
    }

    #[test]
    fn test_non_string_message_is_not_a_rejection() {
        let error = response_error(422, json!({"message": ["not", "a", "string"]}));
        assert!(validation_messages(&error).is_none());
    }

    #[test]
    fn test_non_http_error_is_not_a_rejection() {
        let error = ApiError::MissingAccessToken;
        assert!(validation_messages(&error).is_none());
    }

    #[test]
    fn test_save_outcome_is_saved() {
        assert!(SaveOutcome::Saved.is_saved());
        assert!(!SaveOutcome::Rejected.is_saved());
    }
}
