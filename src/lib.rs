//! # MyRxx API Client
//!
//! A Rust client for the MyRxx exercise-prescription service. The client
//! authenticates an office/provider principal through OAuth token
//! exchanges and exposes the versioned REST surface: the current office,
//! patient CRUD and lookup, and workout prescriptions.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use myrxx::{
//!     Api, ClientId, ClientSecret, MyRxxConfig, Office, Provider, RedirectUri, ServerMode,
//! };
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = MyRxxConfig::builder()
//!     .client_id(ClientId::new("your-client-id")?)
//!     .client_secret(ClientSecret::new("your-client-secret")?)
//!     .redirect_uri(RedirectUri::new("https://myapp.example.com/oauth2/callback")?)
//!     .mode(ServerMode::Production)
//!     .build()?;
//!
//! let office = Office {
//!     name: Some("Clinic A".to_string()),
//!     ..Office::default()
//! };
//! let provider = Provider {
//!     email: Some("provider@example.com".to_string()),
//!     ..Provider::default()
//! };
//!
//! let mut api = Api::new(config, office, provider);
//!
//! // Registered providers log in with a password; new ones register
//! // as part of the credentials grant.
//! if api.requires_password().await? {
//!     api.login_with_password("123456").await?;
//! } else {
//!     api.login_without_password().await?;
//! }
//!
//! for patient in api.patients().await? {
//!     println!("{:?} {:?}", patient.first_name, patient.last_name);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Entities
//!
//! Resource types ([`Office`], [`Provider`], [`Patient`],
//! [`Prescription`], [`Workout`], [`PrescribeRedirect`]) are plain owned
//! structs built on the [`ApiObject`] attribute-mapping trait. Decoding
//! is closed-world: a response key outside a type's declared field set is
//! an error, not a silent drop.
//!
//! [`Patient`] is the persistent entity: saving one either rehydrates it
//! from the server's response or, on a validation rejection, records the
//! server's messages on the instance (see [`SaveOutcome`]).
//!
//! ## Environments
//!
//! [`ServerMode`] selects between the production, test, and local server
//! URLs; an explicit `server_url` override on the configuration builder
//! points the client anywhere else (useful in tests).

pub mod auth;
pub mod clients;
pub mod config;
pub mod rest;

mod api;
mod error;

pub use api::{Api, PatientSelector, ProviderLookup};
pub use auth::AccessToken;
pub use config::{
    ClientId, ClientSecret, MyRxxConfig, MyRxxConfigBuilder, RedirectUri, ServerMode,
};
pub use error::{ApiError, ConfigError};
pub use rest::resources::{Office, Patient, PrescribeRedirect, Prescription, Provider, Workout};
pub use rest::{ApiObject, AttributeError, PersistentObject, SaveOutcome, API_VERSION};
