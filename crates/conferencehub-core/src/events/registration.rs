//! Registration-created snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::id::SessionId;

/// Snapshot of a committed registration, consumed by the confirmation
/// email pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RegistrationMessage {
    /// The session registered for.
    pub session_id: SessionId,
    /// Session title at commit time.
    pub session_title: String,
    /// Attendee display name.
    pub attendee_name: String,
    /// Attendee email address.
    pub attendee_email: String,
    /// Session start time.
    pub session_start_time: DateTime<Utc>,
    /// Room the session takes place in.
    pub room: String,
}
