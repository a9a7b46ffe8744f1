//! # conferencehub-dispatch
//!
//! Best-effort fan-out of committed registrations. The store commits first;
//! this crate then delivers the snapshot to every configured downstream
//! channel on a background task, records telemetry for each attempt, and
//! never reports failures back to the caller.

pub mod channels;
pub mod dispatcher;
mod endpoint;
pub mod probe;
pub mod telemetry;

pub use dispatcher::{ChannelStatus, FanoutDispatcher};
pub use telemetry::TelemetryClient;
