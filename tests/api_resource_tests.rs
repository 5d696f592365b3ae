//! Integration tests for the resource operations of the [`Api`] facade.
//!
//! These tests run the full request path against a mock server: path and
//! header construction, response decoding into typed resources, and the
//! error translations the operations perform.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use myrxx::{
    AccessToken, Api, ApiError, ClientId, ClientSecret, MyRxxConfig, Office, PatientSelector,
    PersistentObject, Provider, ProviderLookup, RedirectUri, SaveOutcome,
};

/// Creates a client pointed at the mock server, already logged in.
fn create_api(server: &MockServer) -> Api {
    let mut api = create_api_without_login(server);
    api.login_with_access_token(AccessToken::new("test-token"));
    api
}

fn create_api_without_login(server: &MockServer) -> Api {
    let config = MyRxxConfig::builder()
        .client_id(ClientId::new("test-id").unwrap())
        .client_secret(ClientSecret::new("test-secret").unwrap())
        .redirect_uri(RedirectUri::new("http://localhost:3001/cb").unwrap())
        .server_url(server.uri())
        .build()
        .unwrap();
    Api::new(config, Office::default(), Provider::default())
}

// ============================================================================
// Office
// ============================================================================

#[tokio::test]
async fn test_office_fetches_and_decodes_current_office() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/office"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "office": {
                "id": 7,
                "name": "Clinic A",
                "city": "Portland",
                "application_code": "CODE123"
            }
        })))
        .mount(&server)
        .await;

    let api = create_api(&server);
    let office = api.office().await.unwrap();

    assert_eq!(office.id, Some(7));
    assert_eq!(office.name.as_deref(), Some("Clinic A"));
    assert_eq!(office.application_code.as_deref(), Some("CODE123"));
}

#[tokio::test]
async fn test_office_rejects_missing_wrapper_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/office"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "Clinic A"})))
        .mount(&server)
        .await;

    let api = create_api(&server);
    let result = api.office().await;

    assert!(matches!(
        result,
        Err(ApiError::UnexpectedResponse { expected: "office" })
    ));
}

// ============================================================================
// Patients
// ============================================================================

#[tokio::test]
async fn test_patients_decodes_wrapped_array() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/patients"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"patient": {"id": 1, "first_name": "Ada", "is_connected?": true}},
            {"patient": {"id": 2, "first_name": "Grace"}}
        ])))
        .mount(&server)
        .await;

    let api = create_api(&server);
    let patients = api.patients().await.unwrap();

    assert_eq!(patients.len(), 2);
    assert_eq!(patients[0].id, Some(1));
    assert_eq!(patients[0].is_connected, Some(true));
    assert_eq!(patients[1].first_name.as_deref(), Some("Grace"));
}

#[tokio::test]
async fn test_patient_by_id_uses_resource_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/patients/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "patient": {"id": 42, "email": "ada@example.com"}
        })))
        .mount(&server)
        .await;

    let api = create_api(&server);
    let patient = api.patient(PatientSelector::Id(42)).await.unwrap();

    assert_eq!(patient.id, Some(42));
    assert_eq!(patient.email.as_deref(), Some("ada@example.com"));
}

#[tokio::test]
async fn test_patient_find_by_email_uses_query_param() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/patients/find"))
        .and(query_param("email", "ada@example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "patient": {"id": 42, "email": "ada@example.com"}
        })))
        .mount(&server)
        .await;

    let api = create_api(&server);
    let patient = api
        .patient(PatientSelector::Email("ada@example.com"))
        .await
        .unwrap();

    assert_eq!(patient.id, Some(42));
}

#[tokio::test]
async fn test_patient_find_by_external_id_uses_query_param() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/patients/find"))
        .and(query_param("external_id", "EHR-9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "patient": {"id": 9, "external_id": "EHR-9"}
        })))
        .mount(&server)
        .await;

    let api = create_api(&server);
    let patient = api
        .patient(PatientSelector::ExternalId("EHR-9"))
        .await
        .unwrap();

    assert_eq!(patient.external_id.as_deref(), Some("EHR-9"));
}

#[tokio::test]
async fn test_patient_not_found_propagates_http_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/patients/999"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not found"})))
        .mount(&server)
        .await;

    let api = create_api(&server);
    let result = api.patient(PatientSelector::Id(999)).await;

    match result {
        Err(ApiError::Http(myrxx::clients::HttpError::Response(response))) => {
            assert_eq!(response.code, 404);
        }
        other => panic!("Expected HTTP 404 error, got {other:?}"),
    }
}

// ============================================================================
// Saving
// ============================================================================

#[tokio::test]
async fn test_create_posts_to_collection_and_adopts_server_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/patients"))
        .and(body_json(json!({
            "patient": {
                "first_name": "Ada",
                "last_name": "Lovelace",
                "email": "ada@example.com",
                "is_connected": null,
                "external_id": null
            }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "patient": {
                "id": 42,
                "first_name": "Ada",
                "last_name": "Lovelace",
                "email": "ada@example.com",
                "is_connected?": false
            }
        })))
        .mount(&server)
        .await;

    let api = create_api(&server);
    let values = json!({
        "first_name": "Ada",
        "last_name": "Lovelace",
        "email": "ada@example.com"
    });
    let patient = api.create_patient(values.as_object().unwrap()).await.unwrap();

    assert_eq!(patient.id, Some(42));
    assert_eq!(patient.is_connected, Some(false));
    assert!(patient.errors().is_empty());
}

#[tokio::test]
async fn test_save_puts_to_resource_path_for_existing_patient() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/v2/patients/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "patient": {"id": 42, "first_name": "Ada", "last_name": "King"}
        })))
        .mount(&server)
        .await;

    let api = create_api(&server);
    let values = json!({"id": 42, "first_name": "Ada", "last_name": "King"});
    let mut patient = api.new_patient(values.as_object().unwrap()).unwrap();

    let outcome = patient.save(&api).await.unwrap();

    assert_eq!(outcome, SaveOutcome::Saved);
    assert_eq!(patient.last_name.as_deref(), Some("King"));
}

#[tokio::test]
async fn test_rejected_save_records_validation_messages() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/patients"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "Last name can't be blank\nEmail can't be blank"
        })))
        .mount(&server)
        .await;

    let api = create_api(&server);
    let values = json!({"first_name": "Ada"});
    let mut patient = api.new_patient(values.as_object().unwrap()).unwrap();

    let outcome = patient.save(&api).await.unwrap();

    assert_eq!(outcome, SaveOutcome::Rejected);
    assert!(patient.id().is_none());
    assert_eq!(
        patient.errors(),
        ["Last name can't be blank", "Email can't be blank"]
    );
}

#[tokio::test]
async fn test_accepted_save_clears_earlier_validation_messages() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/patients"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "patient": {"id": 7, "first_name": "Ada", "email": "ada@example.com"}
        })))
        .mount(&server)
        .await;

    let api = create_api(&server);
    let values = json!({"first_name": "Ada", "email": "ada@example.com"});
    let mut patient = api.new_patient(values.as_object().unwrap()).unwrap();
    patient.set_errors(vec!["Email can't be blank".to_string()]);

    let outcome = patient.save(&api).await.unwrap();

    assert_eq!(outcome, SaveOutcome::Saved);
    assert!(patient.errors().is_empty());
}

#[tokio::test]
async fn test_server_error_during_save_propagates() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/patients"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"error": "Internal Server Error"})),
        )
        .mount(&server)
        .await;

    let api = create_api(&server);
    let mut patient = api
        .new_patient(json!({"first_name": "Ada"}).as_object().unwrap())
        .unwrap();

    let result = patient.save(&api).await;

    match result {
        Err(ApiError::Http(myrxx::clients::HttpError::Response(response))) => {
            assert_eq!(response.code, 500);
        }
        other => panic!("Expected HTTP 500 error, got {other:?}"),
    }
    assert!(patient.errors().is_empty());
}

// ============================================================================
// Prescriptions
// ============================================================================

#[tokio::test]
async fn test_prescribe_returns_browser_redirect() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/patients/42/prescriptions/new"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "prescriberedirect": {"url": "https://myrxx.com/prescribe/42"}
        })))
        .mount(&server)
        .await;

    let api = create_api(&server);
    let patient = api
        .new_patient(json!({"id": 42}).as_object().unwrap())
        .unwrap();

    let redirect = patient.prescribe(&api).await.unwrap();

    assert_eq!(redirect.url.as_deref(), Some("https://myrxx.com/prescribe/42"));
}

#[tokio::test]
async fn test_prescriptions_decode_with_nested_workouts() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/patients/42/prescriptions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "prescription": {
                    "id": 3,
                    "instructions": "Twice daily",
                    "created_at": "2014-05-01T12:00:00Z",
                    "workout": {
                        "id": 11,
                        "name": "Lower Back Basics",
                        "difficulty": 2,
                        "exercise_names": ["bridge", "plank"]
                    }
                }
            }
        ])))
        .mount(&server)
        .await;

    let api = create_api(&server);
    let patient = api
        .new_patient(json!({"id": 42}).as_object().unwrap())
        .unwrap();

    let prescriptions = patient.prescriptions(&api).await.unwrap();

    assert_eq!(prescriptions.len(), 1);
    let workout = prescriptions[0].workout.as_ref().unwrap();
    assert_eq!(workout.name.as_deref(), Some("Lower Back Basics"));
    assert_eq!(
        workout.exercise_names.as_deref(),
        Some(["bridge".to_string(), "plank".to_string()].as_slice())
    );
}

// ============================================================================
// Provider lookup
// ============================================================================

#[tokio::test]
async fn test_provider_exists_sends_credentials_as_query_params() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/providers/exists"))
        .and(query_param("email", "provider@example.com"))
        .and(query_param("client_id", "test-id"))
        .and(query_param("client_secret", "test-secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    // No login needed for the existence lookup
    let api = create_api_without_login(&server);
    let lookup = api.provider_exists("provider@example.com").await.unwrap();

    assert_eq!(lookup, ProviderLookup::Found);
}

#[tokio::test]
async fn test_provider_exists_translates_404_to_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/providers/exists"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({})))
        .mount(&server)
        .await;

    let api = create_api_without_login(&server);
    let lookup = api.provider_exists("nobody@example.com").await.unwrap();

    assert_eq!(lookup, ProviderLookup::NotFound);
}

#[tokio::test]
async fn test_provider_exists_propagates_other_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/providers/exists"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({})))
        .mount(&server)
        .await;

    let api = create_api_without_login(&server);
    let result = api.provider_exists("provider@example.com").await;

    match result {
        Err(ApiError::Http(myrxx::clients::HttpError::Response(response))) => {
            assert_eq!(response.code, 503);
        }
        other => panic!("Expected HTTP 503 error, got {other:?}"),
    }
}

// ============================================================================
// Login gating
// ============================================================================

#[tokio::test]
async fn test_resource_operations_fail_without_login() {
    let server = MockServer::start().await;
    let api = create_api_without_login(&server);

    assert!(matches!(
        api.office().await,
        Err(ApiError::MissingAccessToken)
    ));
    assert!(matches!(
        api.patients().await,
        Err(ApiError::MissingAccessToken)
    ));
    assert!(matches!(
        api.patient(PatientSelector::Id(1)).await,
        Err(ApiError::MissingAccessToken)
    ));
}

#[tokio::test]
async fn test_unknown_response_key_surfaces_attribute_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/patients/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "patient": {"id": 42, "phone": "555-0100"}
        })))
        .mount(&server)
        .await;

    let api = create_api(&server);
    let result = api.patient(PatientSelector::Id(42)).await;

    assert!(matches!(result, Err(ApiError::Attribute(_))));
}
