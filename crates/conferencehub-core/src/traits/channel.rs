//! Downstream fan-out channel trait.

use async_trait::async_trait;

use crate::events::RegistrationMessage;
use crate::result::AppResult;

/// Outcome of a publish that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// The downstream accepted the message.
    Sent,
    /// The channel decided not to send (e.g. payload over the batch limit).
    Skipped(&'static str),
}

/// A best-effort downstream destination for committed registrations.
///
/// Implementations only perform the network call. Skipping disabled
/// channels, probing secrets, timeouts, and failure recording are handled
/// by the dispatcher that owns the channel.
#[async_trait]
pub trait FanoutChannel: Send + Sync + std::fmt::Debug + 'static {
    /// Short channel name used in logs (e.g. `"service_bus"`).
    fn name(&self) -> &'static str;

    /// Prefix for telemetry event names, e.g. `ServiceBusMessage` yields
    /// `ServiceBusMessagePublished` / `ServiceBusMessagePublishFailed`.
    fn event_prefix(&self) -> &'static str;

    /// Dependency type reported in telemetry (e.g. `"Message Bus"`).
    fn dependency_type(&self) -> &'static str;

    /// Operation name passed to the secret probe (e.g. `"ServiceBusPublish"`).
    fn probe_operation(&self) -> &'static str;

    /// Destination name (topic, hub) reported in telemetry.
    fn target(&self) -> &str;

    /// Whether the channel has usable configuration.
    fn is_enabled(&self) -> bool;

    /// Publish one registration snapshot.
    async fn publish(&self, message: &RegistrationMessage) -> AppResult<Delivery>;
}
