//! HTTP request handlers organized by domain.

pub mod health;
pub mod organizer;
pub mod registrations;
pub mod sessions;
