//! # conferencehub-entity
//!
//! Domain entity models for ConferenceHub. Every struct in this crate is
//! either a stored record (`Session`, `Registration`) or the caller-supplied
//! input used to create one. All entities derive `Debug`, `Clone`,
//! `Serialize`, and `Deserialize`.

pub mod registration;
pub mod session;

pub use registration::{NewRegistration, Registration};
pub use session::{NewSession, Session};
