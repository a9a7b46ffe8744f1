//! Attendee registration: validate, commit, then fan out.

use std::sync::Arc;

use tracing::info;
use validator::Validate;

use conferencehub_core::error::AppError;
use conferencehub_core::types::id::SessionId;
use conferencehub_dispatch::FanoutDispatcher;
use conferencehub_entity::registration::{NewRegistration, Registration};
use conferencehub_store::ConferenceStore;

/// Registers attendees and notifies downstream channels.
#[derive(Debug, Clone)]
pub struct RegistrationService {
    /// Backing store.
    store: Arc<ConferenceStore>,
    /// Best-effort downstream delivery.
    dispatcher: Arc<FanoutDispatcher>,
}

impl RegistrationService {
    /// Creates a new registration service.
    pub fn new(store: Arc<ConferenceStore>, dispatcher: Arc<FanoutDispatcher>) -> Self {
        Self { store, dispatcher }
    }

    /// Registers an attendee for a session.
    ///
    /// The registration and the session's count are committed together; the
    /// returned value is final regardless of how downstream delivery goes.
    pub async fn register(&self, new: NewRegistration) -> Result<Registration, AppError> {
        let new = new.trimmed();
        new.validate()?;

        let (registration, message) = self.store.create_registration(new).await?;
        info!(
            registration_id = %registration.id,
            session_id = %registration.session_id,
            "Attendee registered"
        );

        self.dispatcher.dispatch(message);
        Ok(registration)
    }

    /// Lists every registration, most recent first.
    pub async fn list_registrations(&self) -> Vec<Registration> {
        self.store.list_registrations().await
    }

    /// Lists registrations for one session, most recent first.
    pub async fn list_for_session(
        &self,
        session_id: SessionId,
    ) -> Result<Vec<Registration>, AppError> {
        if self.store.get_session(session_id).await.is_none() {
            return Err(AppError::not_found(format!(
                "Session {session_id} not found"
            )));
        }
        Ok(self.store.list_registrations_for_session(session_id).await)
    }
}
