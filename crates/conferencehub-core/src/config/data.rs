//! Seed data configuration.

use serde::{Deserialize, Serialize};

/// Where the startup seed of sessions is read from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Path to the JSON array of session records loaded once at startup.
    #[serde(default = "default_seed_path")]
    pub seed_sessions_path: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            seed_sessions_path: default_seed_path(),
        }
    }
}

fn default_seed_path() -> String {
    "data/sessions.json".to_string()
}
