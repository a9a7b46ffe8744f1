//! Session table.
//!
//! Plain synchronous data structure; callers reach it only through
//! [`ConferenceStore`](crate::ConferenceStore), which holds the lock.

use conferencehub_core::error::AppError;
use conferencehub_core::result::AppResult;
use conferencehub_core::types::id::SessionId;
use conferencehub_entity::session::{NewSession, Session};

use crate::allocator::IdAllocator;

/// Sessions in insertion order.
#[derive(Debug, Default)]
pub struct SessionTable {
    rows: Vec<Session>,
    ids: IdAllocator,
}

impl SessionTable {
    /// Build a table from pre-existing rows (seed data), keeping their ids.
    ///
    /// Rows must already carry unique positive ids; see
    /// [`seed::sanitize`](crate::seed::sanitize).
    pub fn from_rows(rows: Vec<Session>) -> Self {
        let ids = IdAllocator::after(rows.iter().map(|s| s.id.value()));
        Self { rows, ids }
    }

    /// All sessions ordered by start time; equal start times keep
    /// insertion order.
    pub fn list(&self) -> Vec<Session> {
        let mut sessions = self.rows.clone();
        sessions.sort_by_key(|s| s.start_time);
        sessions
    }

    /// Look up a session by id.
    pub fn get(&self, id: SessionId) -> Option<&Session> {
        self.rows.iter().find(|s| s.id == id)
    }

    /// Whether a session with `id` exists.
    pub fn contains(&self, id: SessionId) -> bool {
        self.get(id).is_some()
    }

    /// Number of stored sessions.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Insert a new session with a freshly allocated id and a zero count.
    pub fn insert(&mut self, new: NewSession) -> AppResult<Session> {
        let id = self.ids.next_id()?;
        let session = Session::from_new(SessionId(id), new);
        self.rows.push(session.clone());
        Ok(session)
    }

    /// Replace the stored session with the same id.
    ///
    /// The derived count and the slide list are owned by the store and are
    /// carried over from the stored row; the replacement keeps its position
    /// in insertion order.
    pub fn replace(&mut self, mut session: Session) -> AppResult<Session> {
        let existing = self
            .rows
            .iter_mut()
            .find(|s| s.id == session.id)
            .ok_or_else(|| AppError::not_found(format!("Session {} not found", session.id)))?;

        session.current_registrations = existing.current_registrations;
        session.slide_urls = existing.slide_urls.clone();
        *existing = session.clone();
        Ok(session)
    }

    /// Remove a session. Returns the removed row, if it existed.
    pub fn remove(&mut self, id: SessionId) -> Option<Session> {
        let index = self.rows.iter().position(|s| s.id == id)?;
        Some(self.rows.remove(index))
    }

    /// Add one to a session's derived count.
    pub fn increment_registrations(&mut self, id: SessionId) -> AppResult<()> {
        let session = self.get_mut(id)?;
        session.current_registrations += 1;
        Ok(())
    }

    /// Append slide references in the given order.
    pub fn append_slide_urls(&mut self, id: SessionId, urls: &[String]) -> AppResult<Session> {
        let session = self.get_mut(id)?;
        session.slide_urls.extend(urls.iter().cloned());
        Ok(session.clone())
    }

    /// Overwrite every derived count using `count_for`.
    pub fn recount(&mut self, count_for: impl Fn(SessionId) -> u32) {
        for session in &mut self.rows {
            session.current_registrations = count_for(session.id);
        }
    }

    fn get_mut(&mut self, id: SessionId) -> AppResult<&mut Session> {
        self.rows
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| AppError::not_found(format!("Session {id} not found")))
    }
}
