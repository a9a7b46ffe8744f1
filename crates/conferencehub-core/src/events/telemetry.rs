//! Envelope placed on the telemetry event hub.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named event with its payload and emission time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryEnvelope {
    /// Event name, e.g. `RegistrationCreated`.
    pub event_name: String,
    /// When the envelope was built.
    pub timestamp_utc: DateTime<Utc>,
    /// Arbitrary JSON payload.
    pub payload: serde_json::Value,
}

impl TelemetryEnvelope {
    /// Build an envelope stamped with the current time.
    pub fn new(event_name: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            event_name: event_name.into(),
            timestamp_utc: Utc::now(),
            payload,
        }
    }
}
