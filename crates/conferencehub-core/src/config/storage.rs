//! Slide storage configuration.

use serde::{Deserialize, Serialize};

/// Storage for uploaded session material.
///
/// Unlike the fan-out channels this is required infrastructure: slide
/// uploads fail with a configuration error when `root_path` is empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlideStorageConfig {
    /// Root directory slides are written under.
    #[serde(default)]
    pub root_path: String,
    /// Public base URL prefixed to stored object paths.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
    /// Container (top-level directory) name.
    #[serde(default = "default_container")]
    pub container_name: String,
}

impl Default for SlideStorageConfig {
    fn default() -> Self {
        Self {
            root_path: String::new(),
            public_base_url: default_public_base_url(),
            container_name: default_container(),
        }
    }
}

impl SlideStorageConfig {
    /// Whether a storage root has been configured.
    pub fn is_configured(&self) -> bool {
        !self.root_path.trim().is_empty()
    }
}

fn default_public_base_url() -> String {
    "http://localhost:8080/slides".to_string()
}

fn default_container() -> String {
    "slides".to_string()
}
