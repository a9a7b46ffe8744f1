//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{TimeZone, Utc};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use conferencehub_api::{AppState, build_router};
use conferencehub_core::config::AppConfig;
use conferencehub_core::config::messaging::MessagingConfig;
use conferencehub_core::traits::SlideStorage;
use conferencehub_core::types::id::SessionId;
use conferencehub_dispatch::{FanoutDispatcher, TelemetryClient};
use conferencehub_entity::session::Session;
use conferencehub_service::SlideService;
use conferencehub_storage::LocalSlideStorage;
use conferencehub_store::ConferenceStore;

/// Organizer key used by gated test apps.
pub const ORGANIZER_KEY: &str = "let-me-in";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Store for direct inspection
    pub store: Arc<ConferenceStore>,
    /// Dispatcher for draining background work
    pub dispatcher: Arc<FanoutDispatcher>,
    /// Recorded telemetry
    pub telemetry: Arc<TelemetryClient>,
    /// Keeps the slide directory alive for the test
    _slides: Option<TempDir>,
}

/// Options for building a [`TestApp`].
#[derive(Default)]
pub struct TestAppOptions {
    /// Require the organizer key on organizer routes
    pub gated: bool,
    /// Configure local slide storage in a temp dir
    pub slide_storage: bool,
    /// Downstream channel configuration (all disabled when `None`)
    pub messaging: Option<MessagingConfig>,
}

impl TestApp {
    /// Open organizer routes, no slide storage, two seeded sessions
    pub async fn new() -> Self {
        Self::with_options(TestAppOptions::default()).await
    }

    /// Create a test application
    pub async fn with_options(options: TestAppOptions) -> Self {
        let mut config = AppConfig::default();
        if options.gated {
            config.auth.organizer_key = ORGANIZER_KEY.to_string();
        }
        if let Some(messaging) = options.messaging {
            config.messaging = messaging;
        }

        let slides = if options.slide_storage {
            let dir = tempfile::tempdir().expect("Failed to create slide dir");
            config.storage.root_path = dir.path().to_string_lossy().to_string();
            Some(dir)
        } else {
            None
        };

        let store = Arc::new(ConferenceStore::from_seed(seed_sessions()));
        let telemetry = Arc::new(TelemetryClient::with_recorder());
        let dispatcher = Arc::new(
            FanoutDispatcher::from_config(&config.messaging, Arc::clone(&telemetry))
                .expect("Failed to build dispatcher"),
        );

        let storage: Option<Arc<dyn SlideStorage>> = if config.storage.is_configured() {
            Some(Arc::new(
                LocalSlideStorage::new(&config.storage)
                    .await
                    .expect("Failed to init slide storage"),
            ))
        } else {
            None
        };
        let slide_service =
            SlideService::new(Arc::clone(&store), storage, Arc::clone(&dispatcher));

        let state = AppState::new(
            Arc::new(config),
            Arc::clone(&store),
            Arc::clone(&dispatcher),
            slide_service,
        );

        Self {
            router: build_router(state),
            store,
            dispatcher,
            telemetry,
            _slides: slides,
        }
    }

    /// Make a JSON request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        organizer_key: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(key) = organizer_key {
            req = req.header("x-organizer-key", key);
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Upload files as `multipart/form-data`
    pub async fn upload(&self, path: &str, files: &[(&str, &[u8])]) -> TestResponse {
        let boundary = "conferencehub-test-boundary";
        let mut body = Vec::new();
        for (name, data) in files {
            body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
            body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"files\"; filename=\"{name}\"\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(b"Content-Type: application/pdf\r\n\r\n");
            body.extend_from_slice(data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());

        let req = Request::builder()
            .method("POST")
            .uri(path)
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={boundary}"),
            )
            .header("traceparent", "00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01")
            .body(Body::from(body))
            .expect("Failed to build request");

        self.send(req).await
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Two sessions with stale seed counts that the store must reset.
fn seed_sessions() -> Vec<Session> {
    let start = Utc
        .with_ymd_and_hms(2026, 11, 15, 9, 0, 0)
        .single()
        .expect("valid time");
    vec![
        Session {
            id: SessionId(1),
            title: "Opening Keynote".to_string(),
            speaker: "Dr. Sarah Chen".to_string(),
            start_time: start,
            end_time: start + chrono::Duration::hours(1),
            room: "Main Hall".to_string(),
            description: String::new(),
            capacity: 2,
            current_registrations: 40,
            slide_urls: Vec::new(),
        },
        Session {
            id: SessionId(2),
            title: "Event-Driven Architectures".to_string(),
            speaker: "Marcus Johnson".to_string(),
            start_time: start + chrono::Duration::hours(2),
            end_time: start + chrono::Duration::hours(3),
            room: "Room A".to_string(),
            description: String::new(),
            capacity: 120,
            current_registrations: 0,
            slide_urls: Vec::new(),
        },
    ]
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `data` member of a success envelope
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }
}
