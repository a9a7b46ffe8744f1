//! Session entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use conferencehub_core::types::id::SessionId;

/// A scheduled conference talk.
///
/// `current_registrations` is derived from registration membership and is
/// owned by the store; values supplied by callers are ignored. PascalCase
/// aliases accept seed files exported by the legacy site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Unique session identifier.
    #[serde(default, alias = "Id")]
    pub id: SessionId,
    /// Talk title.
    #[serde(default, alias = "Title")]
    pub title: String,
    /// Speaker name.
    #[serde(default, alias = "Speaker")]
    pub speaker: String,
    /// When the session starts.
    #[serde(alias = "StartTime", alias = "startTime")]
    pub start_time: DateTime<Utc>,
    /// When the session ends.
    #[serde(alias = "EndTime", alias = "endTime")]
    pub end_time: DateTime<Utc>,
    /// Room name.
    #[serde(default, alias = "Room")]
    pub room: String,
    /// Abstract.
    #[serde(default, alias = "Description")]
    pub description: String,
    /// Advertised seat count. Not enforced as a hard cap.
    #[serde(default, alias = "Capacity")]
    pub capacity: u32,
    /// Number of registrations referencing this session.
    #[serde(
        default,
        alias = "CurrentRegistrations",
        alias = "currentRegistrations"
    )]
    pub current_registrations: u32,
    /// Uploaded material, in upload order.
    #[serde(default, alias = "SlideUrls", alias = "slideUrls")]
    pub slide_urls: Vec<String>,
}

impl Session {
    /// Build a stored session from caller input and an allocated id.
    pub fn from_new(id: SessionId, new: NewSession) -> Self {
        Self {
            id,
            title: new.title,
            speaker: new.speaker,
            start_time: new.start_time,
            end_time: new.end_time,
            room: new.room,
            description: new.description,
            capacity: new.capacity,
            current_registrations: 0,
            slide_urls: new.slide_urls,
        }
    }

    /// Caller-editable fields of this session, for validation.
    pub fn to_new(&self) -> NewSession {
        NewSession {
            title: self.title.clone(),
            speaker: self.speaker.clone(),
            start_time: self.start_time,
            end_time: self.end_time,
            room: self.room.clone(),
            description: self.description.clone(),
            capacity: self.capacity,
            slide_urls: self.slide_urls.clone(),
        }
    }

    /// Seats left before reaching capacity (zero when over-booked).
    pub fn seats_remaining(&self) -> u32 {
        self.capacity.saturating_sub(self.current_registrations)
    }

    /// Whether registrations have reached or exceeded capacity.
    pub fn is_full(&self) -> bool {
        self.current_registrations >= self.capacity
    }
}

/// Caller-supplied fields for creating or replacing a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_schedule"))]
pub struct NewSession {
    /// Talk title.
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,
    /// Speaker name.
    #[serde(default)]
    pub speaker: String,
    /// When the session starts.
    pub start_time: DateTime<Utc>,
    /// When the session ends.
    pub end_time: DateTime<Utc>,
    /// Room name.
    #[serde(default)]
    pub room: String,
    /// Abstract.
    #[serde(default)]
    pub description: String,
    /// Advertised seat count.
    #[serde(default)]
    pub capacity: u32,
    /// Initial material, if any.
    #[serde(default)]
    pub slide_urls: Vec<String>,
}

fn validate_schedule(session: &NewSession) -> Result<(), ValidationError> {
    if session.end_time < session.start_time {
        return Err(ValidationError::new("schedule")
            .with_message("End time must not be before start time".into()));
    }
    if session.title.trim().is_empty() {
        return Err(ValidationError::new("title").with_message("Title is required".into()));
    }
    Ok(())
}
