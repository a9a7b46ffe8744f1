//! Attendee registration.

pub mod service;

pub use service::RegistrationService;
