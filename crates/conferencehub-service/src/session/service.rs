//! Session CRUD with input validation.

use std::sync::Arc;

use tracing::info;
use validator::Validate;

use conferencehub_core::error::AppError;
use conferencehub_core::types::id::SessionId;
use conferencehub_entity::session::{NewSession, Session};
use conferencehub_store::ConferenceStore;

/// Manages the session catalogue.
#[derive(Debug, Clone)]
pub struct SessionService {
    /// Backing store.
    store: Arc<ConferenceStore>,
}

impl SessionService {
    /// Creates a new session service.
    pub fn new(store: Arc<ConferenceStore>) -> Self {
        Self { store }
    }

    /// Lists every session ordered by start time.
    pub async fn list_sessions(&self) -> Vec<Session> {
        self.store.list_sessions().await
    }

    /// Gets a session by ID.
    pub async fn get_session(&self, id: SessionId) -> Result<Session, AppError> {
        self.store
            .get_session(id)
            .await
            .ok_or_else(|| AppError::not_found(format!("Session {id} not found")))
    }

    /// Creates a session after validating its schedule and title.
    pub async fn create_session(&self, new: NewSession) -> Result<Session, AppError> {
        new.validate()?;
        let session = self.store.create_session(new).await?;
        info!(session_id = %session.id, title = %session.title, "Session created");
        Ok(session)
    }

    /// Replaces the session at `id` with `session`.
    ///
    /// A body id of zero adopts the path id; any other mismatch is rejected.
    /// The registration count is kept from the stored row.
    pub async fn update_session(
        &self,
        id: SessionId,
        mut session: Session,
    ) -> Result<Session, AppError> {
        if session.id.value() == 0 {
            session.id = id;
        } else if session.id != id {
            return Err(AppError::validation(format!(
                "Session id {} does not match path id {id}",
                session.id
            )));
        }
        session.to_new().validate()?;

        let updated = self.store.update_session(session).await?;
        info!(session_id = %updated.id, "Session updated");
        Ok(updated)
    }

    /// Deletes a session and all of its registrations.
    pub async fn delete_session(&self, id: SessionId) -> Result<(), AppError> {
        if !self.store.delete_session(id).await? {
            return Err(AppError::not_found(format!("Session {id} not found")));
        }
        info!(session_id = %id, "Session deleted");
        Ok(())
    }
}
