//! Convenience result type alias for ConferenceHub.

use crate::error::AppError;

/// A specialized `Result` type for ConferenceHub operations.
pub type AppResult<T> = Result<T, AppError>;
