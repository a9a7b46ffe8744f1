//! Organizer route gating.

use serde::{Deserialize, Serialize};

/// Organizer vs. public gating configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Shared key expected in the `x-organizer-key` header on organizer
    /// routes. When empty, organizer routes are open.
    #[serde(default)]
    pub organizer_key: String,
}

impl AuthConfig {
    /// Whether organizer routes require a key.
    pub fn is_gated(&self) -> bool {
        !self.organizer_key.trim().is_empty()
    }
}
