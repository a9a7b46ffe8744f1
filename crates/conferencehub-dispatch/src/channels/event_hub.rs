//! Telemetry event hub channel.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Url};
use tracing::warn;

use conferencehub_core::config::messaging::EventHubConfig;
use conferencehub_core::events::{RegistrationMessage, TelemetryEnvelope};
use conferencehub_core::result::AppResult;
use conferencehub_core::traits::{Delivery, FanoutChannel};

use crate::endpoint;

/// Event name carried in every envelope this channel sends.
pub const REGISTRATION_CREATED: &str = "RegistrationCreated";

/// Wraps each snapshot in a [`TelemetryEnvelope`] and posts it to
/// `{endpoint}/{hub}/messages`.
#[derive(Debug, Clone)]
pub struct EventHubChannel {
    client: Client,
    url: Option<Url>,
    hub: String,
    access_key: String,
    max_batch_bytes: usize,
}

impl EventHubChannel {
    /// Build the channel; disabled when the endpoint or hub name is missing.
    pub fn new(client: Client, config: &EventHubConfig) -> Self {
        let url = if config.is_configured() {
            endpoint::resolve("event_hub", &config.endpoint, &[&config.hub_name, "messages"])
        } else {
            None
        };

        Self {
            client,
            url,
            hub: config.hub_name.trim().to_string(),
            access_key: config.access_key.clone(),
            max_batch_bytes: config.max_batch_bytes,
        }
    }
}

#[async_trait]
impl FanoutChannel for EventHubChannel {
    fn name(&self) -> &'static str {
        "event_hub"
    }

    fn event_prefix(&self) -> &'static str {
        "EventHubMessage"
    }

    fn dependency_type(&self) -> &'static str {
        "Event Hub"
    }

    fn probe_operation(&self) -> &'static str {
        "EventHubPublish"
    }

    fn target(&self) -> &str {
        &self.hub
    }

    fn is_enabled(&self) -> bool {
        self.url.is_some()
    }

    async fn publish(&self, message: &RegistrationMessage) -> AppResult<Delivery> {
        let Some(url) = &self.url else {
            return Ok(Delivery::Skipped("not configured"));
        };

        let envelope = TelemetryEnvelope::new(REGISTRATION_CREATED, serde_json::to_value(message)?);
        let body = serde_json::to_vec(&envelope)?;
        if body.len() > self.max_batch_bytes {
            warn!(
                event = REGISTRATION_CREATED,
                size = body.len(),
                limit = self.max_batch_bytes,
                "Event payload too large for event hub batch"
            );
            return Ok(Delivery::Skipped("payload exceeds batch limit"));
        }

        let request = self
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body);
        endpoint::authorize(request, &self.access_key)
            .send()
            .await?
            .error_for_status()?;
        Ok(Delivery::Sent)
    }
}
