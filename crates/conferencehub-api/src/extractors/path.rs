//! Typed path parameter helpers.

use conferencehub_core::error::AppError;
use conferencehub_core::types::id::SessionId;

/// Parses a session id from a path segment.
pub fn parse_session_id(s: &str) -> Result<SessionId, AppError> {
    s.parse::<SessionId>()
        .map_err(|_| AppError::validation(format!("Invalid session id: {s}")))
}
