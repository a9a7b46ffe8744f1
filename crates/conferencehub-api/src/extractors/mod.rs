//! Custom Axum extractors.

pub mod organizer;
pub mod path;

pub use organizer::OrganizerAccess;
pub use path::parse_session_id;
