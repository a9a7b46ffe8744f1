//! # conferencehub-api
//!
//! HTTP API layer for ConferenceHub built on Axum.
//!
//! Provides the public session and registration endpoints, the
//! organizer-only management endpoints, middleware (CORS, request logging),
//! extractors, DTOs, and error mapping.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
