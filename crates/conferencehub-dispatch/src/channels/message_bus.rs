//! Message bus channel feeding the confirmation email pipeline.

use async_trait::async_trait;
use reqwest::{Client, Url};
use uuid::Uuid;

use conferencehub_core::config::messaging::ServiceBusConfig;
use conferencehub_core::events::RegistrationMessage;
use conferencehub_core::result::AppResult;
use conferencehub_core::traits::{Delivery, FanoutChannel};

use super::CORRELATION_HEADER;
use crate::endpoint;

/// Posts each registration snapshot as JSON to `{endpoint}/{topic}/messages`.
#[derive(Debug, Clone)]
pub struct MessageBusChannel {
    client: Client,
    url: Option<Url>,
    topic: String,
    access_key: String,
}

impl MessageBusChannel {
    /// Build the channel; disabled when the endpoint or topic is missing.
    pub fn new(client: Client, config: &ServiceBusConfig) -> Self {
        let url = if config.is_configured() {
            endpoint::resolve(
                "service_bus",
                &config.endpoint,
                &[&config.topic_name, "messages"],
            )
        } else {
            None
        };

        Self {
            client,
            url,
            topic: config.topic_name.trim().to_string(),
            access_key: config.access_key.clone(),
        }
    }
}

#[async_trait]
impl FanoutChannel for MessageBusChannel {
    fn name(&self) -> &'static str {
        "service_bus"
    }

    fn event_prefix(&self) -> &'static str {
        "ServiceBusMessage"
    }

    fn dependency_type(&self) -> &'static str {
        "Message Bus"
    }

    fn probe_operation(&self) -> &'static str {
        "ServiceBusPublish"
    }

    fn target(&self) -> &str {
        &self.topic
    }

    fn is_enabled(&self) -> bool {
        self.url.is_some()
    }

    async fn publish(&self, message: &RegistrationMessage) -> AppResult<Delivery> {
        let Some(url) = &self.url else {
            return Ok(Delivery::Skipped("not configured"));
        };

        let request = self
            .client
            .post(url.clone())
            .header(CORRELATION_HEADER, Uuid::new_v4().to_string())
            .json(message);
        endpoint::authorize(request, &self.access_key)
            .send()
            .await?
            .error_for_status()?;
        Ok(Delivery::Sent)
    }
}
