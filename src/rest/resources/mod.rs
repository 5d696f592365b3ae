//! Typed MyRxx resources.
//!
//! Each type mirrors one remote resource shape and implements
//! [`ApiObject`](crate::rest::ApiObject); [`Patient`] additionally
//! implements [`PersistentObject`](crate::rest::PersistentObject).

mod office;
mod patient;
mod prescribe_redirect;
mod prescription;
mod provider;
mod workout;

pub use office::Office;
pub use patient::Patient;
pub use prescribe_redirect::PrescribeRedirect;
pub use prescription::Prescription;
pub use provider::Provider;
pub use workout::Workout;
