//! Store coordinator.
//!
//! Both tables live behind a single [`tokio::sync::Mutex`]. Every mutation
//! that spans tables (registering an attendee, cascading a session delete)
//! happens inside one critical section, so readers never observe a
//! registration without its count or a count without its registrations.

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{debug, info};

use conferencehub_core::error::AppError;
use conferencehub_core::events::RegistrationMessage;
use conferencehub_core::result::AppResult;
use conferencehub_core::types::id::SessionId;
use conferencehub_entity::registration::{NewRegistration, Registration};
use conferencehub_entity::session::{NewSession, Session};

use crate::registrations::RegistrationTable;
use crate::seed;
use crate::sessions::SessionTable;

#[derive(Debug, Default)]
struct Tables {
    sessions: SessionTable,
    registrations: RegistrationTable,
}

impl Tables {
    fn recount(&mut self) {
        let registrations = &self.registrations;
        self.sessions.recount(|id| registrations.count_for(id));
    }
}

/// Point-in-time copy of both tables, used by health checks and tests.
#[derive(Debug, Clone)]
pub struct StoreSnapshot {
    /// Sessions ordered by start time.
    pub sessions: Vec<Session>,
    /// Registrations, most recent first.
    pub registrations: Vec<Registration>,
}

impl StoreSnapshot {
    /// Whether every session's count equals its registration membership.
    pub fn counts_consistent(&self) -> bool {
        self.sessions.iter().all(|s| {
            let members = self
                .registrations
                .iter()
                .filter(|r| r.session_id == s.id)
                .count() as u32;
            members == s.current_registrations
        })
    }

    /// Whether every registration references an existing session.
    pub fn no_orphans(&self) -> bool {
        self.registrations
            .iter()
            .all(|r| self.sessions.iter().any(|s| s.id == r.session_id))
    }
}

/// In-memory conference store.
#[derive(Debug, Default)]
pub struct ConferenceStore {
    inner: Mutex<Tables>,
}

impl ConferenceStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store from seed sessions.
    ///
    /// Seeded counts are not trusted: with no registrations loaded, every
    /// session starts at zero. Rows with a zero or repeated id are dropped.
    pub fn from_seed(sessions: Vec<Session>) -> Self {
        let mut tables = Tables {
            sessions: SessionTable::from_rows(seed::sanitize(sessions)),
            registrations: RegistrationTable::default(),
        };
        tables.recount();
        info!(sessions = tables.sessions.len(), "Conference store seeded");
        Self {
            inner: Mutex::new(tables),
        }
    }

    // ── Sessions ──────────────────────────────────────────────────

    /// All sessions ordered by ascending start time.
    pub async fn list_sessions(&self) -> Vec<Session> {
        self.inner.lock().await.sessions.list()
    }

    /// One session by id, or `None`.
    pub async fn get_session(&self, id: SessionId) -> Option<Session> {
        self.inner.lock().await.sessions.get(id).cloned()
    }

    /// Insert a session with a fresh id and a zero count.
    pub async fn create_session(&self, new: NewSession) -> AppResult<Session> {
        let mut tables = self.inner.lock().await;
        let session = tables.sessions.insert(new)?;
        debug!(session_id = %session.id, title = %session.title, "Session created");
        Ok(session)
    }

    /// Replace a stored session, keeping its derived count.
    pub async fn update_session(&self, session: Session) -> AppResult<Session> {
        let mut tables = self.inner.lock().await;
        let updated = tables.sessions.replace(session)?;
        debug!(session_id = %updated.id, "Session updated");
        Ok(updated)
    }

    /// Delete a session and every registration for it.
    ///
    /// Returns `false` when no such session exists.
    pub async fn delete_session(&self, id: SessionId) -> AppResult<bool> {
        let mut tables = self.inner.lock().await;
        if tables.sessions.remove(id).is_none() {
            return Ok(false);
        }
        let removed = tables.registrations.delete_by_session(id);
        debug!(session_id = %id, registrations_removed = removed, "Session deleted");
        Ok(true)
    }

    /// Append slide URLs to a session in the given order.
    pub async fn append_slide_urls(&self, id: SessionId, urls: &[String]) -> AppResult<Session> {
        let mut tables = self.inner.lock().await;
        tables.sessions.append_slide_urls(id, urls)
    }

    // ── Registrations ─────────────────────────────────────────────

    /// All registrations, most recent first.
    pub async fn list_registrations(&self) -> Vec<Registration> {
        self.inner.lock().await.registrations.list()
    }

    /// Registrations for one session, most recent first.
    pub async fn list_registrations_for_session(&self, session_id: SessionId) -> Vec<Registration> {
        self.inner
            .lock()
            .await
            .registrations
            .list_by_session(session_id)
    }

    /// Commit a registration and bump the session's count atomically.
    ///
    /// Returns the stored registration together with the fan-out snapshot,
    /// both captured while the lock is held. Fails with `NotFound` when the
    /// session does not exist; nothing is written in that case.
    pub async fn create_registration(
        &self,
        new: NewRegistration,
    ) -> AppResult<(Registration, RegistrationMessage)> {
        let mut tables = self.inner.lock().await;

        let session = tables
            .sessions
            .get(new.session_id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Session {} not found", new.session_id)))?;

        let registration = tables.registrations.insert(new, Utc::now())?;
        tables.sessions.increment_registrations(session.id)?;

        let message = RegistrationMessage {
            session_id: session.id,
            session_title: session.title,
            attendee_name: registration.attendee_name.clone(),
            attendee_email: registration.attendee_email.clone(),
            session_start_time: session.start_time,
            room: session.room,
        };

        debug!(
            registration_id = %registration.id,
            session_id = %registration.session_id,
            "Registration committed"
        );
        Ok((registration, message))
    }

    // ── Maintenance ───────────────────────────────────────────────

    /// Recompute every session's count from registration membership.
    pub async fn recount(&self) {
        self.inner.lock().await.recount();
    }

    /// Consistent copy of both tables.
    pub async fn snapshot(&self) -> StoreSnapshot {
        let tables = self.inner.lock().await;
        StoreSnapshot {
            sessions: tables.sessions.list(),
            registrations: tables.registrations.list(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    use chrono::{Duration, TimeZone};
    use conferencehub_core::types::id::RegistrationId;

    fn new_session(title: &str, hour: u32, capacity: u32) -> NewSession {
        let start = Utc.with_ymd_and_hms(2026, 5, 1, hour, 0, 0).unwrap();
        NewSession {
            title: title.to_string(),
            speaker: "Speaker".to_string(),
            start_time: start,
            end_time: start + Duration::hours(1),
            room: "Hall A".to_string(),
            description: String::new(),
            capacity,
            slide_urls: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_keynote_registration_flow() {
        let store = ConferenceStore::new();
        let keynote = store.create_session(new_session("Keynote", 9, 2)).await.unwrap();
        assert_eq!(keynote.id, SessionId(1));

        let (reg, msg) = store
            .create_registration(NewRegistration::new(keynote.id, "Alice", "a@x.com"))
            .await
            .unwrap();
        assert_eq!(reg.id, RegistrationId(1));
        assert_eq!(msg.session_title, "Keynote");
        assert_eq!(msg.room, "Hall A");
        assert_eq!(msg.attendee_email, "a@x.com");

        let session = store.get_session(keynote.id).await.unwrap();
        assert_eq!(session.current_registrations, 1);
    }

    #[tokio::test]
    async fn test_capacity_is_not_a_hard_cap() {
        let store = ConferenceStore::new();
        let s = store.create_session(new_session("Tiny", 9, 1)).await.unwrap();
        for name in ["A", "B", "C"] {
            store
                .create_registration(NewRegistration::new(s.id, name, "x@x.com"))
                .await
                .unwrap();
        }
        let session = store.get_session(s.id).await.unwrap();
        assert_eq!(session.current_registrations, 3);
        assert!(session.is_full());
    }

    #[tokio::test]
    async fn test_registration_for_missing_session_writes_nothing() {
        let store = ConferenceStore::new();
        let err = store
            .create_registration(NewRegistration::new(SessionId(99), "A", "a@x.com"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(store.list_registrations().await.is_empty());
    }

    #[tokio::test]
    async fn test_delete_session_cascades() {
        let store = ConferenceStore::new();
        let a = store.create_session(new_session("A", 9, 10)).await.unwrap();
        let b = store.create_session(new_session("B", 10, 10)).await.unwrap();
        for _ in 0..3 {
            store
                .create_registration(NewRegistration::new(a.id, "x", "x@x.com"))
                .await
                .unwrap();
        }
        store
            .create_registration(NewRegistration::new(b.id, "y", "y@x.com"))
            .await
            .unwrap();

        assert!(store.delete_session(a.id).await.unwrap());
        assert!(!store.delete_session(a.id).await.unwrap());

        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.sessions.len(), 1);
        assert_eq!(snapshot.registrations.len(), 1);
        assert!(snapshot.no_orphans());
        assert!(snapshot.counts_consistent());
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_cascade_delete() {
        let store = ConferenceStore::new();
        let a = store.create_session(new_session("A", 9, 10)).await.unwrap();
        let b = store.create_session(new_session("B", 10, 10)).await.unwrap();
        let first = store
            .create_registration(NewRegistration::new(a.id, "x", "x@x.com"))
            .await
            .unwrap()
            .0;
        let second = store
            .create_registration(NewRegistration::new(b.id, "y", "y@x.com"))
            .await
            .unwrap()
            .0;
        assert!(store.delete_session(b.id).await.unwrap());

        let third = store
            .create_registration(NewRegistration::new(a.id, "z", "z@x.com"))
            .await
            .unwrap()
            .0;
        assert!(first.id < second.id && second.id < third.id);

        let c = store.create_session(new_session("C", 11, 10)).await.unwrap();
        assert_eq!(c.id, SessionId(3));
    }

    #[tokio::test]
    async fn test_update_keeps_uploaded_slides() {
        let store = ConferenceStore::new();
        let s = store.create_session(new_session("Deck", 9, 10)).await.unwrap();
        store
            .append_slide_urls(s.id, &["u1".to_string()])
            .await
            .unwrap();

        let mut edited = s.clone();
        edited.title = "Deck, revised".to_string();
        let updated = store.update_session(edited).await.unwrap();
        assert_eq!(updated.title, "Deck, revised");
        assert_eq!(updated.slide_urls, vec!["u1"]);
    }

    #[tokio::test]
    async fn test_update_keeps_count_and_rejects_unknown() {
        let store = ConferenceStore::new();
        let s = store.create_session(new_session("Old", 9, 10)).await.unwrap();
        store
            .create_registration(NewRegistration::new(s.id, "A", "a@x.com"))
            .await
            .unwrap();

        let mut edited = s.clone();
        edited.title = "New".to_string();
        edited.current_registrations = 0;
        let updated = store.update_session(edited).await.unwrap();
        assert_eq!(updated.title, "New");
        assert_eq!(updated.current_registrations, 1);

        let mut ghost = s.clone();
        ghost.id = SessionId(77);
        assert!(store.update_session(ghost).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_seed_counts_are_recomputed() {
        let mut seeded = Session::from_new(SessionId(5), new_session("Seeded", 9, 50));
        seeded.current_registrations = 42;
        let store = ConferenceStore::from_seed(vec![seeded]);

        let session = store.get_session(SessionId(5)).await.unwrap();
        assert_eq!(session.current_registrations, 0);

        let next = store.create_session(new_session("Next", 10, 10)).await.unwrap();
        assert_eq!(next.id, SessionId(6));
    }

    #[tokio::test]
    async fn test_seed_with_bad_ids_keeps_ids_unique() {
        let rows = vec![
            Session::from_new(SessionId(3), new_session("Three", 9, 10)),
            Session::from_new(SessionId(0), new_session("Zero", 10, 10)),
            Session::from_new(SessionId(3), new_session("Three again", 11, 10)),
        ];
        let store = ConferenceStore::from_seed(rows);

        let sessions = store.list_sessions().await;
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].title, "Three");
        assert!(store.get_session(SessionId(0)).await.is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_registrations_keep_counts_exact() {
        let store = Arc::new(ConferenceStore::new());
        let session_id = store
            .create_session(new_session("Busy", 9, 10))
            .await
            .unwrap()
            .id;

        let tasks = (0..100).map(|i| {
            let store = store.clone();
            tokio::spawn(async move {
                store
                    .create_registration(NewRegistration::new(
                        session_id,
                        format!("Attendee {i}"),
                        format!("a{i}@x.com"),
                    ))
                    .await
            })
        });
        let results = futures::future::join_all(tasks).await;

        let ids: HashSet<RegistrationId> = results
            .into_iter()
            .map(|r| r.unwrap().unwrap().0.id)
            .collect();
        assert_eq!(ids.len(), 100);

        let session = store.get_session(session_id).await.unwrap();
        assert_eq!(session.current_registrations, 100);
        assert!(store.snapshot().await.counts_consistent());
    }

    #[tokio::test]
    async fn test_registrations_listed_most_recent_first() {
        let store = ConferenceStore::new();
        let s = store.create_session(new_session("S", 9, 10)).await.unwrap();
        for name in ["first", "second", "third"] {
            store
                .create_registration(NewRegistration::new(s.id, name, "x@x.com"))
                .await
                .unwrap();
        }
        let names: Vec<String> = store
            .list_registrations_for_session(s.id)
            .await
            .into_iter()
            .map(|r| r.attendee_name)
            .collect();
        assert_eq!(names, vec!["third", "second", "first"]);
    }
}
