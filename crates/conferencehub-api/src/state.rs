//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use conferencehub_core::config::AppConfig;
use conferencehub_dispatch::FanoutDispatcher;
use conferencehub_service::{RegistrationService, SessionService, SlideService};
use conferencehub_store::ConferenceStore;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Conference store (health counts)
    pub store: Arc<ConferenceStore>,
    /// Fan-out dispatcher (channel status, telemetry counters)
    pub dispatcher: Arc<FanoutDispatcher>,
    /// Session service
    pub session_service: Arc<SessionService>,
    /// Registration service
    pub registration_service: Arc<RegistrationService>,
    /// Slide upload service
    pub slide_service: Arc<SlideService>,
    /// Process start, for uptime
    pub started_at: Instant,
}

impl AppState {
    /// Assemble state from its parts.
    pub fn new(
        config: Arc<AppConfig>,
        store: Arc<ConferenceStore>,
        dispatcher: Arc<FanoutDispatcher>,
        slide_service: SlideService,
    ) -> Self {
        Self {
            session_service: Arc::new(SessionService::new(store.clone())),
            registration_service: Arc::new(RegistrationService::new(
                store.clone(),
                dispatcher.clone(),
            )),
            slide_service: Arc::new(slide_service),
            config,
            store,
            dispatcher,
            started_at: Instant::now(),
        }
    }
}
