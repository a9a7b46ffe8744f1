//! HTTP-level integration tests for the ConferenceHub API.

mod health_test;
mod helpers;
mod organizer_test;
mod registration_test;
mod session_test;
