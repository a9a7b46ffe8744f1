//! Secrets store health probe trait.

use async_trait::async_trait;

use crate::result::AppResult;

/// Reads a well-known secret purely to observe credential-store health.
///
/// Probe results never gate a publish.
#[async_trait]
pub trait SecretProbe: Send + Sync + std::fmt::Debug + 'static {
    /// Whether the probe has usable configuration.
    fn is_enabled(&self) -> bool;

    /// Host the probe talks to, reported in telemetry.
    fn target(&self) -> String;

    /// Name of the secret being read.
    fn secret_name(&self) -> &str;

    /// Perform the probe on behalf of `operation`.
    async fn probe(&self, operation: &str) -> AppResult<()>;
}
