//! Route definitions for the ConferenceHub HTTP API.
//!
//! All routes are mounted under `/api`. Organizer routes live under
//! `/api/organizer` and require [`OrganizerAccess`](crate::extractors::OrganizerAccess).

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post, put},
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
///
/// When slide storage is configured its root is also served under
/// `/slides`, matching the default public base URL.
pub fn build_router(state: AppState) -> Router {
    let max_body = state.config.server.max_body_bytes;

    let api_routes = Router::new()
        .merge(public_routes())
        .merge(organizer_routes());

    let cors = middleware::cors::build_cors_layer(&state.config.server);

    let mut router = Router::new().nest("/api", api_routes);
    if state.config.storage.is_configured() {
        router = router.nest_service(
            "/slides",
            ServeDir::new(state.config.storage.root_path.trim()),
        );
    }

    router
        .layer(DefaultBodyLimit::max(max_body))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Health, catalogue, and attendee registration
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/sessions", get(handlers::sessions::list_sessions))
        .route("/sessions/{id}", get(handlers::sessions::get_session))
        .route(
            "/sessions/{id}/registrations",
            post(handlers::registrations::register),
        )
}

/// Session management, registration listing, slide upload
fn organizer_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/organizer/sessions",
            post(handlers::organizer::create_session),
        )
        .route(
            "/organizer/sessions/{id}",
            put(handlers::organizer::update_session).delete(handlers::organizer::delete_session),
        )
        .route(
            "/organizer/sessions/{id}/slides",
            post(handlers::organizer::upload_slides),
        )
        .route(
            "/organizer/registrations",
            get(handlers::registrations::list_registrations),
        )
}
