//! Thumbnail job queue.

use reqwest::{Client, Url};

use conferencehub_core::config::messaging::ThumbnailQueueConfig;
use conferencehub_core::events::ThumbnailJob;
use conferencehub_core::result::AppResult;

use crate::endpoint;

/// Posts one JSON job per uploaded slide to `{endpoint}/{queue}/messages`.
#[derive(Debug, Clone)]
pub struct ThumbnailQueueChannel {
    client: Client,
    url: Option<Url>,
    queue: String,
    access_key: String,
}

impl ThumbnailQueueChannel {
    /// Build the queue client; disabled when the endpoint or queue name is
    /// missing.
    pub fn new(client: Client, config: &ThumbnailQueueConfig) -> Self {
        let url = if config.is_configured() {
            endpoint::resolve(
                "thumbnail_queue",
                &config.endpoint,
                &[&config.queue_name, "messages"],
            )
        } else {
            None
        };

        Self {
            client,
            url,
            queue: config.queue_name.trim().to_string(),
            access_key: config.access_key.clone(),
        }
    }

    /// Whether the queue has usable configuration.
    pub fn is_enabled(&self) -> bool {
        self.url.is_some()
    }

    /// Queue name reported in telemetry.
    pub fn target(&self) -> &str {
        &self.queue
    }

    /// Enqueue a single job.
    pub async fn enqueue(&self, job: &ThumbnailJob) -> AppResult<()> {
        let Some(url) = &self.url else {
            return Ok(());
        };

        let request = self.client.post(url.clone()).json(job);
        endpoint::authorize(request, &self.access_key)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
