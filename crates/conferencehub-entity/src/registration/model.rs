//! Registration entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use conferencehub_core::types::id::{RegistrationId, SessionId};

/// An attendee's signup for a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    /// Unique registration identifier.
    pub id: RegistrationId,
    /// The session registered for.
    pub session_id: SessionId,
    /// Attendee display name.
    pub attendee_name: String,
    /// Attendee email address.
    pub attendee_email: String,
    /// Commit time, stamped by the store.
    pub registered_at: DateTime<Utc>,
}

/// Caller-supplied fields for a new registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct NewRegistration {
    /// The session to register for.
    pub session_id: SessionId,
    /// Attendee display name.
    #[validate(length(min = 1, max = 200, message = "Attendee name is required"))]
    pub attendee_name: String,
    /// Attendee email address.
    #[validate(email(message = "Attendee email must be a valid address"))]
    pub attendee_email: String,
}

impl NewRegistration {
    /// Convenience constructor.
    pub fn new(
        session_id: SessionId,
        attendee_name: impl Into<String>,
        attendee_email: impl Into<String>,
    ) -> Self {
        Self {
            session_id,
            attendee_name: attendee_name.into(),
            attendee_email: attendee_email.into(),
        }
    }

    /// Copy with surrounding whitespace removed from the free-text fields.
    pub fn trimmed(&self) -> Self {
        Self {
            session_id: self.session_id,
            attendee_name: self.attendee_name.trim().to_string(),
            attendee_email: self.attendee_email.trim().to_string(),
        }
    }
}
