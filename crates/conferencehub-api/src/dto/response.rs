//! Response DTOs.

use serde::{Deserialize, Serialize};

use conferencehub_dispatch::ChannelStatus;
use conferencehub_dispatch::telemetry::TelemetryCounters;
use conferencehub_entity::session::Session;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// A session with its derived seat figures.
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    /// The stored session.
    #[serde(flatten)]
    pub session: Session,
    /// Seats left before capacity.
    pub seats_remaining: u32,
    /// Whether capacity has been reached.
    pub is_full: bool,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        Self {
            seats_remaining: session.seats_remaining(),
            is_full: session.is_full(),
            session,
        }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Always `ok` when the process answers.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Seconds since startup.
    pub uptime_seconds: u64,
    /// Stored sessions.
    pub sessions: usize,
    /// Stored registrations.
    pub registrations: usize,
    /// Whether slide uploads are accepted.
    pub slide_storage: bool,
    /// Fan-out channel state.
    pub channels: Vec<ChannelStatus>,
    /// Background deliveries still running.
    pub deliveries_in_flight: usize,
    /// Telemetry totals.
    pub telemetry: TelemetryCounters,
}
