//! Fan-out dispatcher.
//!
//! Takes committed snapshots and delivers them to every enabled channel on
//! a background task. Delivery is best-effort: nothing here can fail the
//! caller, and nothing here touches store state.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use futures::future::join_all;
use reqwest::Client;
use tokio_util::task::TaskTracker;
use tracing::{debug, error, info, warn};

use conferencehub_core::config::messaging::{DispatchConfig, MessagingConfig};
use conferencehub_core::error::{AppError, ErrorKind};
use conferencehub_core::events::{RegistrationMessage, ThumbnailJob};
use conferencehub_core::result::AppResult;
use conferencehub_core::traits::{Delivery, FanoutChannel, SecretProbe};
use conferencehub_core::types::id::SessionId;

use crate::channels::{EventHubChannel, MessageBusChannel, ThumbnailQueueChannel};
use crate::probe::KeyVaultProbe;
use crate::telemetry::{DependencyCall, TelemetryClient};

/// Enabled/disabled state of one channel, reported on the health endpoint.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ChannelStatus {
    /// Channel name.
    pub name: &'static str,
    /// Whether the channel will be used.
    pub enabled: bool,
}

#[derive(Debug)]
struct Shared {
    channels: Vec<Arc<dyn FanoutChannel>>,
    probe: Option<Arc<dyn SecretProbe>>,
    thumbnails: Option<ThumbnailQueueChannel>,
    telemetry: Arc<TelemetryClient>,
    publish_timeout: Duration,
    probe_timeout: Duration,
}

/// Best-effort delivery of registration snapshots and thumbnail jobs.
#[derive(Debug, Clone)]
pub struct FanoutDispatcher {
    shared: Arc<Shared>,
    tracker: TaskTracker,
}

/// Builder for [`FanoutDispatcher`].
#[derive(Debug)]
pub struct FanoutDispatcherBuilder {
    channels: Vec<Arc<dyn FanoutChannel>>,
    probe: Option<Arc<dyn SecretProbe>>,
    thumbnails: Option<ThumbnailQueueChannel>,
    telemetry: Arc<TelemetryClient>,
    timeouts: DispatchConfig,
}

impl FanoutDispatcherBuilder {
    /// Add a registration channel.
    pub fn channel(mut self, channel: Arc<dyn FanoutChannel>) -> Self {
        self.channels.push(channel);
        self
    }

    /// Set the secret probe run before each publish.
    pub fn probe(mut self, probe: Arc<dyn SecretProbe>) -> Self {
        self.probe = Some(probe);
        self
    }

    /// Set the thumbnail job queue.
    pub fn thumbnail_queue(mut self, queue: ThumbnailQueueChannel) -> Self {
        self.thumbnails = Some(queue);
        self
    }

    /// Override publish and probe timeouts.
    pub fn timeouts(mut self, timeouts: DispatchConfig) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Finish building.
    pub fn build(self) -> FanoutDispatcher {
        FanoutDispatcher {
            shared: Arc::new(Shared {
                channels: self.channels,
                probe: self.probe,
                thumbnails: self.thumbnails,
                telemetry: self.telemetry,
                publish_timeout: Duration::from_millis(self.timeouts.publish_timeout_ms),
                probe_timeout: Duration::from_millis(self.timeouts.probe_timeout_ms),
            }),
            tracker: TaskTracker::new(),
        }
    }
}

impl FanoutDispatcher {
    /// Start building a dispatcher that reports to `telemetry`.
    pub fn builder(telemetry: Arc<TelemetryClient>) -> FanoutDispatcherBuilder {
        FanoutDispatcherBuilder {
            channels: Vec::new(),
            probe: None,
            thumbnails: None,
            telemetry,
            timeouts: DispatchConfig::default(),
        }
    }

    /// Wire every channel from configuration. Unconfigured channels are kept
    /// but report themselves disabled.
    pub fn from_config(
        config: &MessagingConfig,
        telemetry: Arc<TelemetryClient>,
    ) -> AppResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("conferencehub/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    "Failed to build HTTP client for fan-out channels",
                    e,
                )
            })?;

        let dispatcher = Self::builder(telemetry)
            .channel(Arc::new(MessageBusChannel::new(
                client.clone(),
                &config.service_bus,
            )))
            .channel(Arc::new(EventHubChannel::new(client.clone(), &config.event_hub)))
            .probe(Arc::new(KeyVaultProbe::new(client.clone(), &config.key_vault)))
            .thumbnail_queue(ThumbnailQueueChannel::new(client, &config.thumbnail_queue))
            .timeouts(config.dispatch.clone())
            .build();

        for status in dispatcher.channel_status() {
            info!(channel = status.name, enabled = status.enabled, "Fan-out channel");
        }
        Ok(dispatcher)
    }

    /// Telemetry client shared with the channels.
    pub fn telemetry(&self) -> &Arc<TelemetryClient> {
        &self.shared.telemetry
    }

    /// Enabled state of every channel, thumbnail queue included.
    pub fn channel_status(&self) -> Vec<ChannelStatus> {
        let mut status: Vec<ChannelStatus> = self
            .shared
            .channels
            .iter()
            .map(|c| ChannelStatus {
                name: c.name(),
                enabled: c.is_enabled(),
            })
            .collect();
        status.push(ChannelStatus {
            name: "thumbnail_queue",
            enabled: self
                .shared
                .thumbnails
                .as_ref()
                .is_some_and(ThumbnailQueueChannel::is_enabled),
        });
        status
    }

    /// Number of delivery tasks still running.
    pub fn in_flight(&self) -> usize {
        self.tracker.len()
    }

    /// Deliver `message` to every enabled channel in the background.
    ///
    /// Returns immediately; delivery outcomes are only visible in logs and
    /// telemetry.
    pub fn dispatch(&self, message: RegistrationMessage) {
        let enabled: Vec<Arc<dyn FanoutChannel>> = self
            .shared
            .channels
            .iter()
            .filter(|channel| {
                if channel.is_enabled() {
                    true
                } else {
                    info!(
                        channel = channel.name(),
                        session_id = %message.session_id,
                        "Channel is not configured; skipping registration event"
                    );
                    false
                }
            })
            .cloned()
            .collect();

        if enabled.is_empty() {
            return;
        }

        let shared = self.shared.clone();
        self.tracker.spawn(async move {
            join_all(
                enabled
                    .iter()
                    .map(|channel| shared.deliver(channel.as_ref(), &message)),
            )
            .await;
        });
    }

    /// Queue one thumbnail job per slide URL in the background.
    pub fn dispatch_thumbnails(
        &self,
        session_id: SessionId,
        slide_urls: Vec<String>,
        traceparent: Option<String>,
    ) {
        let enabled = self
            .shared
            .thumbnails
            .as_ref()
            .is_some_and(ThumbnailQueueChannel::is_enabled);
        if !enabled {
            info!(%session_id, "Thumbnail queue is not configured; skipping thumbnail jobs");
            return;
        }
        if slide_urls.is_empty() {
            return;
        }

        let shared = self.shared.clone();
        self.tracker.spawn(async move {
            shared.enqueue_thumbnails(session_id, slide_urls, traceparent).await;
        });
    }

    /// Wait up to `grace` for in-flight deliveries to finish.
    ///
    /// Returns `true` when everything finished in time. The dispatcher keeps
    /// accepting work afterwards.
    pub async fn drain(&self, grace: Duration) -> bool {
        self.tracker.close();
        let finished = tokio::time::timeout(grace, self.tracker.wait())
            .await
            .is_ok();
        self.tracker.reopen();

        if !finished {
            warn!(
                in_flight = self.tracker.len(),
                grace_ms = grace.as_millis() as u64,
                "Fan-out deliveries still running after grace period"
            );
        }
        finished
    }
}

impl Shared {
    async fn deliver(&self, channel: &dyn FanoutChannel, message: &RegistrationMessage) {
        self.run_probe(channel.probe_operation()).await;

        let started_at = Utc::now();
        let clock = Instant::now();
        let outcome = match tokio::time::timeout(self.publish_timeout, channel.publish(message)).await
        {
            Ok(result) => result,
            Err(_) => Err(AppError::external(format!(
                "Publish to {} timed out after {}ms",
                channel.name(),
                self.publish_timeout.as_millis()
            ))),
        };
        let elapsed = clock.elapsed();

        let dependency = |success: bool| DependencyCall {
            dependency_type: channel.dependency_type().to_string(),
            target: channel.target().to_string(),
            name: "Publish".to_string(),
            data: "RegistrationCreated".to_string(),
            started_at,
            duration: elapsed,
            result_code: if success { "OK" } else { "ERROR" }.to_string(),
            success,
        };

        match outcome {
            Ok(Delivery::Sent) => {
                self.telemetry.track_dependency(dependency(true));
                self.telemetry.track_event(
                    &format!("{}Published", channel.event_prefix()),
                    &[
                        ("Target", channel.target().to_string()),
                        ("SessionId", message.session_id.to_string()),
                    ],
                );
                debug!(
                    channel = channel.name(),
                    session_id = %message.session_id,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Registration event published"
                );
            }
            Ok(Delivery::Skipped(reason)) => {
                info!(
                    channel = channel.name(),
                    session_id = %message.session_id,
                    reason,
                    "Registration event skipped"
                );
            }
            Err(e) => {
                self.telemetry.track_dependency(dependency(false));
                self.telemetry.track_event(
                    &format!("{}PublishFailed", channel.event_prefix()),
                    &[
                        ("Target", channel.target().to_string()),
                        ("SessionId", message.session_id.to_string()),
                        ("Error", e.message.clone()),
                    ],
                );
                error!(
                    channel = channel.name(),
                    session_id = %message.session_id,
                    error = %e,
                    "Failed to publish registration event"
                );
            }
        }
    }

    async fn enqueue_thumbnails(
        &self,
        session_id: SessionId,
        slide_urls: Vec<String>,
        traceparent: Option<String>,
    ) {
        let Some(queue) = &self.thumbnails else {
            return;
        };
        self.run_probe("QueueEnqueue").await;

        for slide_url in slide_urls {
            let job = ThumbnailJob {
                session_id,
                slide_url,
                traceparent: traceparent.clone(),
            };

            let started_at = Utc::now();
            let clock = Instant::now();
            let result = match tokio::time::timeout(self.publish_timeout, queue.enqueue(&job)).await
            {
                Ok(result) => result,
                Err(_) => Err(AppError::external(format!(
                    "Thumbnail enqueue timed out after {}ms",
                    self.publish_timeout.as_millis()
                ))),
            };
            let success = result.is_ok();

            self.telemetry.track_dependency(DependencyCall {
                dependency_type: "Storage Queue".to_string(),
                target: queue.target().to_string(),
                name: "Enqueue".to_string(),
                data: "ThumbnailJob".to_string(),
                started_at,
                duration: clock.elapsed(),
                result_code: if success { "OK" } else { "ERROR" }.to_string(),
                success,
            });

            let mut properties = vec![
                ("Queue", queue.target().to_string()),
                ("SessionId", session_id.to_string()),
                ("SlideUrl", job.slide_url.clone()),
            ];
            match result {
                Ok(()) => {
                    self.telemetry
                        .track_event("ThumbnailJobEnqueued", &properties);
                }
                Err(e) => {
                    properties.push(("Error", e.message.clone()));
                    self.telemetry
                        .track_event("ThumbnailJobEnqueueFailed", &properties);
                    error!(
                        %session_id,
                        slide_url = %job.slide_url,
                        error = %e,
                        "Failed to enqueue thumbnail job"
                    );
                }
            }
        }
    }

    /// Run the secret probe, recording the outcome. Never fails.
    async fn run_probe(&self, operation: &str) {
        let Some(probe) = &self.probe else {
            return;
        };
        if !probe.is_enabled() {
            return;
        }

        let started_at = Utc::now();
        let clock = Instant::now();
        let result = match tokio::time::timeout(self.probe_timeout, probe.probe(operation)).await {
            Ok(result) => result,
            Err(_) => Err(AppError::external(format!(
                "Secret probe timed out after {}ms",
                self.probe_timeout.as_millis()
            ))),
        };
        let success = result.is_ok();

        self.telemetry.track_dependency(DependencyCall {
            dependency_type: "Key Vault".to_string(),
            target: probe.target(),
            name: format!("GetSecret:{}", probe.secret_name()),
            data: operation.to_string(),
            started_at,
            duration: clock.elapsed(),
            result_code: if success { "OK" } else { "ERROR" }.to_string(),
            success,
        });

        if let Err(e) = result {
            self.telemetry.track_event(
                "KeyVaultProbeFailed",
                &[
                    ("Operation", operation.to_string()),
                    ("VaultHost", probe.target()),
                    ("SecretName", probe.secret_name().to_string()),
                    ("Error", e.message.clone()),
                ],
            );
            warn!(operation, error = %e, "Secret store probe failed");
        }
    }
}
