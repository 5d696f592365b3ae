//! The top-level MyRxx API client.
//!
//! [`Api`] binds a configuration, an office/provider principal, and an
//! access token into one facade over the versioned REST surface: login
//! operations, the current office, patient CRUD, and prescriptions.
//!
//! # Example
//!
//! ```rust,ignore
//! use myrxx::{Api, MyRxxConfig, Office, Provider};
//!
//! let mut api = Api::new(config, office, provider);
//!
//! if api.requires_password().await? {
//!     api.login_with_password("123456").await?;
//! } else {
//!     api.login_without_password().await?;
//! }
//!
//! let office = api.office().await?;
//! let patients = api.patients().await?;
//! ```

use serde_json::{json, Map, Value};

use crate::auth::oauth::{
    exchange_office_code, exchange_office_credentials, exchange_password,
};
use crate::auth::AccessToken;
use crate::clients::{HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse};
use crate::config::MyRxxConfig;
use crate::error::ApiError;
use crate::rest::resources::{Office, Patient, PrescribeRedirect, Prescription, Provider};
use crate::rest::{path_for, validation_messages, ApiObject, PersistentObject, SaveOutcome};

/// Identifies a patient for [`Api::patient`].
///
/// A patient can be fetched by its server id or looked up by one of the
/// two search criteria the find endpoint supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatientSelector<'a> {
    /// Fetch by server-assigned id.
    Id(u64),
    /// Look up by email address.
    Email(&'a str),
    /// Look up by the caller's external identifier.
    ExternalId(&'a str),
}

/// The result of a provider-existence lookup.
///
/// Both outcomes are answers, not failures: a missing provider is the
/// signal to use a registration grant instead of a password grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderLookup {
    /// The provider is registered server-side.
    Found,
    /// No provider is registered under the queried email.
    NotFound,
}

/// Client facade for the MyRxx API.
///
/// The facade holds the office and provider records describing the
/// calling principal, performs login through one of three grant
/// operations, and then serves resource operations with the obtained
/// token attached.
///
/// All resource operations return [`ApiError::MissingAccessToken`] until
/// a login operation has succeeded.
#[derive(Debug)]
pub struct Api {
    config: MyRxxConfig,
    http_client: HttpClient,
    office: Office,
    provider: Provider,
    access_token: Option<AccessToken>,
}

// Verify Api is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Api>();
};

impl Api {
    /// Creates a client for the given configuration and principal.
    ///
    /// No network traffic happens here; call one of the login operations
    /// before using the resource operations.
    #[must_use]
    pub fn new(config: MyRxxConfig, office: Office, provider: Provider) -> Self {
        let http_client = HttpClient::new(&config);
        Self {
            config,
            http_client,
            office,
            provider,
            access_token: None,
        }
    }

    /// Returns the configuration this client was built with.
    #[must_use]
    pub const fn config(&self) -> &MyRxxConfig {
        &self.config
    }

    /// Returns the access token, if a login operation has succeeded.
    #[must_use]
    pub const fn access_token(&self) -> Option<&AccessToken> {
        self.access_token.as_ref()
    }

    /// Adopts a previously obtained access token without a network call.
    ///
    /// Useful for resuming a session from stored token data.
    pub fn login_with_access_token(&mut self, token: AccessToken) {
        self.access_token = Some(token);
    }

    /// Logs in with the provider's email and the given password.
    ///
    /// Used when the provider is already registered server-side (see
    /// [`Api::requires_password`]).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Auth`] if the token endpoint rejects the
    /// exchange or cannot be reached.
    pub async fn login_with_password(&mut self, password: &str) -> Result<(), ApiError> {
        let username = self.provider.email.as_deref().unwrap_or_default();
        let token = exchange_password(&self.config, username, password).await?;
        self.access_token = Some(token);
        Ok(())
    }

    /// Logs in with a credentials-style grant, registering the principal
    /// as needed.
    ///
    /// If the office has no application code, the office's and provider's
    /// serialized forms are sent and the server registers both. Otherwise
    /// the application code joins the provider to the existing office.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Auth`] if the token endpoint rejects the
    /// exchange or cannot be reached.
    pub async fn login_without_password(&mut self) -> Result<(), ApiError> {
        let provider_map = self.provider.to_map();

        let token = if self.office.application_code_is_blank() {
            let office_map = self.office.to_map();
            exchange_office_credentials(&self.config, &office_map, &provider_map).await?
        } else {
            let code = self
                .office
                .application_code
                .as_deref()
                .unwrap_or_default();
            exchange_office_code(&self.config, code, &provider_map).await?
        };

        self.access_token = Some(token);
        Ok(())
    }

    /// Returns `true` if the provider must log in with a password.
    ///
    /// A provider already registered server-side authenticates with
    /// [`Api::login_with_password`]; an unregistered one uses
    /// [`Api::login_without_password`].
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the lookup fails for any reason
    /// other than the provider not being found.
    pub async fn requires_password(&self) -> Result<bool, ApiError> {
        let email = self.provider.email.as_deref().unwrap_or_default();
        let lookup = self.provider_exists(email).await?;
        Ok(lookup == ProviderLookup::Found)
    }

    /// Checks whether a provider is registered under the given email.
    ///
    /// This is the one unauthenticated resource operation: the client
    /// credentials are sent as query parameters instead of a bearer
    /// token. A 404 response is the documented "not found" answer and is
    /// returned as [`ProviderLookup::NotFound`] rather than an error.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] for network failures and for any error
    /// response other than 404.
    pub async fn provider_exists(&self, email: &str) -> Result<ProviderLookup, ApiError> {
        let request = HttpRequest::builder(HttpMethod::Get, path_for(&["providers", "exists"]))
            .query_param("email", email)
            .query_param("client_id", self.config.client_id().as_ref())
            .query_param("client_secret", self.config.client_secret().as_ref())
            .build()
            .map_err(HttpError::from)?;

        match self.http_client.request(request).await {
            Ok(_) => {
                tracing::debug!(email, "provider found");
                Ok(ProviderLookup::Found)
            }
            Err(HttpError::Response(response)) if response.code == 404 => {
                tracing::debug!(email, "provider not found");
                Ok(ProviderLookup::NotFound)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Fetches the authenticated office's record.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingAccessToken`] before login,
    /// [`ApiError::Http`] for request failures, and
    /// [`ApiError::UnexpectedResponse`] or [`ApiError::Attribute`] if the
    /// response body does not decode.
    pub async fn office(&self) -> Result<Office, ApiError> {
        let response = self.get(path_for(&["office"])).await?;
        let values = object_in(&response.body, "office")?;
        Ok(Office::from_map(values)?)
    }

    /// Fetches all patients belonging to the office.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingAccessToken`] before login,
    /// [`ApiError::Http`] for request failures, and
    /// [`ApiError::UnexpectedResponse`] or [`ApiError::Attribute`] if the
    /// response body does not decode.
    pub async fn patients(&self) -> Result<Vec<Patient>, ApiError> {
        let response = self.get(path_for(&["patients"])).await?;
        let items = array_of(&response.body, "an array of patient entries")?;

        let mut patients = Vec::with_capacity(items.len());
        for item in items {
            let values = object_in(item, "patient")?;
            patients.push(Patient::from_map(values)?);
        }
        Ok(patients)
    }

    /// Fetches one patient by id or search criterion.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingAccessToken`] before login,
    /// [`ApiError::Http`] for request failures (including 404 when no
    /// patient matches), and [`ApiError::UnexpectedResponse`] or
    /// [`ApiError::Attribute`] if the response body does not decode.
    pub async fn patient(&self, selector: PatientSelector<'_>) -> Result<Patient, ApiError> {
        let request = match selector {
            PatientSelector::Id(id) => {
                HttpRequest::builder(HttpMethod::Get, path_for(&["patients", &id.to_string()]))
            }
            PatientSelector::Email(email) => {
                HttpRequest::builder(HttpMethod::Get, path_for(&["patients", "find"]))
                    .query_param("email", email)
            }
            PatientSelector::ExternalId(external_id) => {
                HttpRequest::builder(HttpMethod::Get, path_for(&["patients", "find"]))
                    .query_param("external_id", external_id)
            }
        };

        let response = self.send_authorized(request).await?;
        let values = object_in(&response.body, "patient")?;
        Ok(Patient::from_map(values)?)
    }

    /// Builds an unsaved patient from an attribute mapping.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Attribute`] if the mapping contains an unknown
    /// key or an ill-typed value.
    pub fn new_patient(&self, values: &Map<String, Value>) -> Result<Patient, ApiError> {
        Ok(Patient::from_map(values)?)
    }

    /// Builds a patient from an attribute mapping and saves it.
    ///
    /// On a validation rejection the returned patient carries the
    /// messages in its error list and has no id; inspect
    /// [`Patient::errors`](crate::rest::PersistentObject::errors).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] for mapping failures and for save failures
    /// other than a validation rejection.
    pub async fn create_patient(
        &self,
        values: &Map<String, Value>,
    ) -> Result<Patient, ApiError> {
        let mut patient = self.new_patient(values)?;
        self.save_patient(&mut patient).await?;
        Ok(patient)
    }

    /// Persists a patient, creating or updating based on its id.
    ///
    /// A patient without an id is POSTed to the collection; one with an
    /// id is PUT to its resource path. On success the patient is
    /// rehydrated from the response (picking up the server-assigned id
    /// on create) and its error list is cleared. A validation rejection
    /// records the server's messages on the patient and returns
    /// [`SaveOutcome::Rejected`].
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingAccessToken`] before login, and
    /// propagates every failure other than a validation rejection.
    pub async fn save_patient(&self, patient: &mut Patient) -> Result<SaveOutcome, ApiError> {
        let body = json!({ "patient": patient.to_map() });

        let request = match patient.id() {
            Some(id) => {
                HttpRequest::builder(HttpMethod::Put, path_for(&["patients", &id.to_string()]))
                    .body(body)
            }
            None => HttpRequest::builder(HttpMethod::Post, path_for(&["patients"])).body(body),
        };

        match self.send_authorized(request).await {
            Ok(response) => {
                let values = object_in(&response.body, "patient")?;
                patient.assign(values)?;
                patient.set_errors(Vec::new());
                Ok(SaveOutcome::Saved)
            }
            Err(error) => match validation_messages(&error) {
                Some(messages) => {
                    patient.set_errors(messages);
                    Ok(SaveOutcome::Rejected)
                }
                None => Err(error),
            },
        }
    }

    /// Starts a new prescription for a saved patient.
    ///
    /// Returns the browser handoff for the MyRxx prescribing interface.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingPatientId`] if the patient has no id,
    /// [`ApiError::MissingAccessToken`] before login, and the usual
    /// request and decoding errors.
    pub async fn prescribe_patient(
        &self,
        patient: &Patient,
    ) -> Result<PrescribeRedirect, ApiError> {
        let id = patient.id().ok_or(ApiError::MissingPatientId {
            operation: "prescribe_patient",
        })?;

        let response = self
            .get(path_for(&[
                "patients",
                &id.to_string(),
                "prescriptions",
                "new",
            ]))
            .await?;
        let values = object_in(&response.body, "prescriberedirect")?;
        Ok(PrescribeRedirect::from_map(values)?)
    }

    /// Fetches a saved patient's prescriptions.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingPatientId`] if the patient has no id,
    /// [`ApiError::MissingAccessToken`] before login, and the usual
    /// request and decoding errors.
    pub async fn patient_prescriptions(
        &self,
        patient: &Patient,
    ) -> Result<Vec<Prescription>, ApiError> {
        let id = patient.id().ok_or(ApiError::MissingPatientId {
            operation: "patient_prescriptions",
        })?;

        let response = self
            .get(path_for(&["patients", &id.to_string(), "prescriptions"]))
            .await?;
        let items = array_of(&response.body, "an array of prescription entries")?;

        let mut prescriptions = Vec::with_capacity(items.len());
        for item in items {
            let values = object_in(item, "prescription")?;
            prescriptions.push(Prescription::from_map(values)?);
        }
        Ok(prescriptions)
    }

    /// Sends an authenticated GET request.
    async fn get(&self, path: String) -> Result<HttpResponse, ApiError> {
        self.send_authorized(HttpRequest::builder(HttpMethod::Get, path))
            .await
    }

    /// Attaches the bearer token to a request and sends it.
    async fn send_authorized(
        &self,
        builder: crate::clients::HttpRequestBuilder,
    ) -> Result<HttpResponse, ApiError> {
        let token = self
            .access_token
            .as_ref()
            .ok_or(ApiError::MissingAccessToken)?;

        let request = builder
            .header("Authorization", token.bearer())
            .build()
            .map_err(HttpError::from)?;

        Ok(self.http_client.request(request).await?)
    }
}

/// Extracts the named nested mapping from a response body.
fn object_in<'a>(body: &'a Value, key: &'static str) -> Result<&'a Map<String, Value>, ApiError> {
    body.get(key)
        .and_then(Value::as_object)
        .ok_or(ApiError::UnexpectedResponse { expected: key })
}

/// Reads a response body as an array.
fn array_of<'a>(body: &'a Value, expected: &'static str) -> Result<&'a Vec<Value>, ApiError> {
    body.as_array()
        .ok_or(ApiError::UnexpectedResponse { expected })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ClientId, ClientSecret, RedirectUri, ServerMode};

    fn test_api() -> Api {
        let config = MyRxxConfig::builder()
            .client_id(ClientId::new("id").unwrap())
            .client_secret(ClientSecret::new("secret").unwrap())
            .redirect_uri(RedirectUri::new("http://localhost:3001/cb").unwrap())
            .mode(ServerMode::Local)
            .build()
            .unwrap();
        Api::new(config, Office::default(), Provider::default())
    }

    #[test]
    fn test_new_starts_without_token() {
        let api = test_api();
        assert!(api.access_token().is_none());
    }

    #[test]
    fn test_login_with_access_token_adopts_token() {
        let mut api = test_api();
        api.login_with_access_token(AccessToken::new("abc"));
        assert_eq!(api.access_token().unwrap().access_token, "abc");
    }

    #[tokio::test]
    async fn test_resource_calls_require_login() {
        let api = test_api();
        let result = api.office().await;
        assert!(matches!(result, Err(ApiError::MissingAccessToken)));
    }

    #[tokio::test]
    async fn test_prescribe_requires_saved_patient() {
        let mut api = test_api();
        api.login_with_access_token(AccessToken::new("abc"));

        let patient = Patient::default();
        let result = api.prescribe_patient(&patient).await;
        assert!(matches!(
            result,
            Err(ApiError::MissingPatientId {
                operation: "prescribe_patient"
            })
        ));
    }

    #[tokio::test]
    async fn test_prescriptions_require_saved_patient() {
        let mut api = test_api();
        api.login_with_access_token(AccessToken::new("abc"));

        let patient = Patient::default();
        let result = api.patient_prescriptions(&patient).await;
        assert!(matches!(
            result,
            Err(ApiError::MissingPatientId {
                operation: "patient_prescriptions"
            })
        ));
    }

    #[test]
    fn test_new_patient_rejects_unknown_keys() {
        let api = test_api();
        let values = serde_json::json!({"phone": "555-0100"});
        let result = api.new_patient(values.as_object().unwrap());
        assert!(matches!(result, Err(ApiError::Attribute(_))));
    }

    #[test]
    fn test_object_in_reports_missing_key() {
        let body = serde_json::json!({"something_else": {}});
        let result = object_in(&body, "office");
        assert!(matches!(
            result,
            Err(ApiError::UnexpectedResponse { expected: "office" })
        ));
    }
}
