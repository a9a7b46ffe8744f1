//! `OrganizerAccess` extractor: gates organizer routes on a shared key.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use conferencehub_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying the organizer key.
pub const ORGANIZER_KEY_HEADER: &str = "x-organizer-key";

/// Proof that the caller may use organizer routes.
///
/// When no organizer key is configured every caller is admitted.
#[derive(Debug, Clone, Copy)]
pub struct OrganizerAccess;

impl FromRequestParts<AppState> for OrganizerAccess {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth = &state.config.auth;
        if !auth.is_gated() {
            return Ok(Self);
        }

        let presented = parts
            .headers
            .get(ORGANIZER_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .unwrap_or_default();

        if presented.is_empty() {
            return Err(AppError::forbidden("Organizer key required").into());
        }
        if presented != auth.organizer_key.trim() {
            tracing::warn!(path = %parts.uri.path(), "Rejected organizer request with wrong key");
            return Err(AppError::forbidden("Invalid organizer key").into());
        }
        Ok(Self)
    }
}
