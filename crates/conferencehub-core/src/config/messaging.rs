//! Downstream fan-out channel configuration.
//!
//! Every channel is optional. A channel with a blank endpoint or blank
//! destination name is treated as intentionally disabled.

use serde::{Deserialize, Serialize};

/// All fan-out channel settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessagingConfig {
    /// Message bus topic used for confirmation-email processing.
    #[serde(default)]
    pub service_bus: ServiceBusConfig,
    /// Telemetry event hub.
    #[serde(default)]
    pub event_hub: EventHubConfig,
    /// Secrets store probed before each publish.
    #[serde(default)]
    pub key_vault: KeyVaultConfig,
    /// Storage queue receiving thumbnail jobs for uploaded slides.
    #[serde(default)]
    pub thumbnail_queue: ThumbnailQueueConfig,
    /// Dispatcher timing.
    #[serde(default)]
    pub dispatch: DispatchConfig,
}

/// Message bus topic configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceBusConfig {
    /// Base URL of the message bus namespace.
    #[serde(default)]
    pub endpoint: String,
    /// Topic that registration messages are published to.
    #[serde(default)]
    pub topic_name: String,
    /// Shared access key sent as a bearer credential (optional).
    #[serde(default)]
    pub access_key: String,
}

impl ServiceBusConfig {
    /// Whether both the endpoint and topic are set.
    pub fn is_configured(&self) -> bool {
        !self.endpoint.trim().is_empty() && !self.topic_name.trim().is_empty()
    }
}

/// Event hub configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventHubConfig {
    /// Base URL of the event hub namespace.
    #[serde(default)]
    pub endpoint: String,
    /// Hub name events are sent to.
    #[serde(default)]
    pub hub_name: String,
    /// Shared access key sent as a bearer credential (optional).
    #[serde(default)]
    pub access_key: String,
    /// Largest serialized envelope accepted in one batch.
    #[serde(default = "default_max_batch_bytes")]
    pub max_batch_bytes: usize,
}

impl Default for EventHubConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            hub_name: String::new(),
            access_key: String::new(),
            max_batch_bytes: default_max_batch_bytes(),
        }
    }
}

impl EventHubConfig {
    /// Whether both the endpoint and hub name are set.
    pub fn is_configured(&self) -> bool {
        !self.endpoint.trim().is_empty() && !self.hub_name.trim().is_empty()
    }
}

/// Secrets store probe configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeyVaultConfig {
    /// Vault base URL.
    #[serde(default)]
    pub vault_uri: String,
    /// Name of the secret read by the probe.
    #[serde(default)]
    pub probe_secret_name: String,
    /// Bearer token used for the probe (optional).
    #[serde(default)]
    pub access_token: String,
}

impl KeyVaultConfig {
    /// Whether both the vault URI and the probe secret are set.
    pub fn is_configured(&self) -> bool {
        !self.vault_uri.trim().is_empty() && !self.probe_secret_name.trim().is_empty()
    }
}

/// Thumbnail job queue configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThumbnailQueueConfig {
    /// Base URL of the queue service.
    #[serde(default)]
    pub endpoint: String,
    /// Queue name.
    #[serde(default)]
    pub queue_name: String,
    /// Shared access key sent as a bearer credential (optional).
    #[serde(default)]
    pub access_key: String,
}

impl ThumbnailQueueConfig {
    /// Whether both the endpoint and queue name are set.
    pub fn is_configured(&self) -> bool {
        !self.endpoint.trim().is_empty() && !self.queue_name.trim().is_empty()
    }
}

/// Dispatcher timing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Upper bound for a single channel publish, in milliseconds.
    #[serde(default = "default_publish_timeout")]
    pub publish_timeout_ms: u64,
    /// Upper bound for the secret probe, in milliseconds.
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_ms: u64,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            publish_timeout_ms: default_publish_timeout(),
            probe_timeout_ms: default_probe_timeout(),
        }
    }
}

fn default_max_batch_bytes() -> usize {
    1024 * 1024
}

fn default_publish_timeout() -> u64 {
    5000
}

fn default_probe_timeout() -> u64 {
    2000
}
