//! Request DTOs.

use serde::{Deserialize, Serialize};

use conferencehub_core::types::id::SessionId;
use conferencehub_entity::registration::NewRegistration;

/// Public registration form body. The session comes from the path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Attendee display name.
    #[serde(default, alias = "attendeeName", alias = "AttendeeName")]
    pub attendee_name: String,
    /// Attendee email address.
    #[serde(default, alias = "attendeeEmail", alias = "AttendeeEmail")]
    pub attendee_email: String,
}

impl RegisterRequest {
    /// Attach the path session id.
    pub fn into_new_registration(self, session_id: SessionId) -> NewRegistration {
        NewRegistration::new(session_id, self.attendee_name, self.attendee_email)
    }
}
