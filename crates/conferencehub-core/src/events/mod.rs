//! Events emitted after registration commits and slide uploads.
//!
//! These are the immutable snapshots handed to the fan-out dispatcher. They
//! are serialized verbatim onto downstream channels, so their field names
//! follow the consumer contract rather than Rust naming.

pub mod registration;
pub mod telemetry;
pub mod thumbnail;

pub use registration::RegistrationMessage;
pub use telemetry::TelemetryEnvelope;
pub use thumbnail::ThumbnailJob;
