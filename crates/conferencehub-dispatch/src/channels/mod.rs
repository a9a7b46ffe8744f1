//! Downstream channel implementations.
//!
//! - [`MessageBusChannel`] posts registration snapshots to a topic
//! - [`EventHubChannel`] posts `RegistrationCreated` telemetry envelopes
//! - [`ThumbnailQueueChannel`] posts thumbnail jobs for uploaded slides

pub mod event_hub;
pub mod message_bus;
pub mod thumbnail_queue;

pub use event_hub::EventHubChannel;
pub use message_bus::MessageBusChannel;
pub use thumbnail_queue::ThumbnailQueueChannel;

/// HTTP client shared by the channels; re-exported so callers can build
/// channels without depending on `reqwest` directly.
pub use reqwest::Client as HttpClient;

/// Header carrying the per-message correlation id.
pub const CORRELATION_HEADER: &str = "x-correlation-id";
