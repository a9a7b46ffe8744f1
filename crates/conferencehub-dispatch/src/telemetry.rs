//! Application telemetry client.
//!
//! Every tracked event and dependency call is emitted as a structured
//! `tracing` event under the `telemetry` target. A recorder can be attached
//! to keep the records in memory for inspection.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// One recorded telemetry item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TelemetryRecord {
    /// A named custom event.
    Event {
        /// Event name, e.g. `ServiceBusMessagePublished`.
        name: String,
        /// Key/value properties in insertion order.
        properties: Vec<(String, String)>,
    },
    /// A call to a downstream dependency.
    Dependency(DependencyCall),
}

/// A completed downstream call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyCall {
    /// Kind of dependency (`Message Bus`, `Event Hub`, ...).
    pub dependency_type: String,
    /// Destination (topic, hub, vault host).
    pub target: String,
    /// Call name (`Publish`, `GetSecret:probe`).
    pub name: String,
    /// Operation on whose behalf the call was made.
    pub data: String,
    /// When the call started.
    pub started_at: DateTime<Utc>,
    /// How long the call took.
    pub duration: Duration,
    /// `OK` or `ERROR`.
    pub result_code: String,
    /// Whether the call succeeded.
    pub success: bool,
}

/// Running totals exposed on the health endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TelemetryCounters {
    /// Custom events tracked.
    pub events: u64,
    /// Dependency calls tracked.
    pub dependencies: u64,
    /// Dependency calls that failed.
    pub failed_dependencies: u64,
}

/// Records application telemetry.
#[derive(Debug, Default)]
pub struct TelemetryClient {
    events: AtomicU64,
    dependencies: AtomicU64,
    failed_dependencies: AtomicU64,
    recorder: Option<Mutex<Vec<TelemetryRecord>>>,
}

impl TelemetryClient {
    /// Client that only logs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Client that also keeps every record in memory.
    pub fn with_recorder() -> Self {
        Self {
            recorder: Some(Mutex::new(Vec::new())),
            ..Self::default()
        }
    }

    /// Track a named custom event.
    pub fn track_event(&self, name: &str, properties: &[(&str, String)]) {
        self.events.fetch_add(1, Ordering::Relaxed);
        tracing::info!(
            target: "telemetry",
            event = name,
            properties = ?properties,
            "Telemetry event"
        );

        self.record(|| TelemetryRecord::Event {
            name: name.to_string(),
            properties: properties
                .iter()
                .map(|(k, v)| ((*k).to_string(), v.clone()))
                .collect(),
        });
    }

    /// Track a completed downstream call.
    pub fn track_dependency(&self, call: DependencyCall) {
        self.dependencies.fetch_add(1, Ordering::Relaxed);
        if !call.success {
            self.failed_dependencies.fetch_add(1, Ordering::Relaxed);
        }
        tracing::info!(
            target: "telemetry",
            dependency_type = %call.dependency_type,
            destination = %call.target,
            call = %call.name,
            data = %call.data,
            duration_ms = call.duration.as_millis() as u64,
            result_code = %call.result_code,
            success = call.success,
            "Telemetry dependency"
        );

        self.record(|| TelemetryRecord::Dependency(call));
    }

    /// Current totals.
    pub fn counters(&self) -> TelemetryCounters {
        TelemetryCounters {
            events: self.events.load(Ordering::Relaxed),
            dependencies: self.dependencies.load(Ordering::Relaxed),
            failed_dependencies: self.failed_dependencies.load(Ordering::Relaxed),
        }
    }

    /// Copy of the recorded items; empty without a recorder.
    pub fn records(&self) -> Vec<TelemetryRecord> {
        match &self.recorder {
            Some(recorder) => recorder.lock().unwrap_or_else(|e| e.into_inner()).clone(),
            None => Vec::new(),
        }
    }

    /// Names of recorded custom events, in order.
    pub fn event_names(&self) -> Vec<String> {
        self.records()
            .into_iter()
            .filter_map(|r| match r {
                TelemetryRecord::Event { name, .. } => Some(name),
                TelemetryRecord::Dependency(_) => None,
            })
            .collect()
    }

    /// Recorded dependency calls, in order.
    pub fn dependencies(&self) -> Vec<DependencyCall> {
        self.records()
            .into_iter()
            .filter_map(|r| match r {
                TelemetryRecord::Dependency(call) => Some(call),
                TelemetryRecord::Event { .. } => None,
            })
            .collect()
    }

    fn record(&self, build: impl FnOnce() -> TelemetryRecord) {
        if let Some(recorder) = &self.recorder {
            recorder
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .push(build());
        }
    }
}
