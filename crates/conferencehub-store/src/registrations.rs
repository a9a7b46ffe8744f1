//! Registration table.

use chrono::{DateTime, Utc};

use conferencehub_core::result::AppResult;
use conferencehub_core::types::id::{RegistrationId, SessionId};
use conferencehub_entity::registration::{NewRegistration, Registration};

use crate::allocator::IdAllocator;

/// Registrations in commit order.
#[derive(Debug, Default)]
pub struct RegistrationTable {
    rows: Vec<Registration>,
    ids: IdAllocator,
    /// Timestamp of the latest commit; keeps `registered_at` monotonic even
    /// if the wall clock steps backwards.
    last_registered_at: Option<DateTime<Utc>>,
}

impl RegistrationTable {
    /// All registrations, most recent first.
    pub fn list(&self) -> Vec<Registration> {
        let mut registrations = self.rows.clone();
        sort_most_recent_first(&mut registrations);
        registrations
    }

    /// Registrations of one session, most recent first.
    pub fn list_by_session(&self, session_id: SessionId) -> Vec<Registration> {
        let mut registrations: Vec<Registration> = self
            .rows
            .iter()
            .filter(|r| r.session_id == session_id)
            .cloned()
            .collect();
        sort_most_recent_first(&mut registrations);
        registrations
    }

    /// Number of registrations referencing `session_id`.
    pub fn count_for(&self, session_id: SessionId) -> u32 {
        self.rows
            .iter()
            .filter(|r| r.session_id == session_id)
            .count() as u32
    }

    /// Total number of registrations.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append a registration with a fresh id, stamped at `now` (clamped so
    /// commit timestamps never decrease).
    ///
    /// Does not check that the session exists; the store does that before
    /// calling in, under the same lock.
    pub fn insert(&mut self, new: NewRegistration, now: DateTime<Utc>) -> AppResult<Registration> {
        let id = self.ids.next_id()?;
        let registered_at = match self.last_registered_at {
            Some(last) if last > now => last,
            _ => now,
        };

        let registration = Registration {
            id: RegistrationId(id),
            session_id: new.session_id,
            attendee_name: new.attendee_name,
            attendee_email: new.attendee_email,
            registered_at,
        };

        self.rows.push(registration.clone());
        self.last_registered_at = Some(registered_at);
        Ok(registration)
    }

    /// Remove every registration for `session_id`; returns how many were
    /// removed. Counts are not touched.
    pub fn delete_by_session(&mut self, session_id: SessionId) -> usize {
        let before = self.rows.len();
        self.rows.retain(|r| r.session_id != session_id);
        before - self.rows.len()
    }
}

/// Descending by `registered_at`, then by id so equal timestamps still list
/// the later commit first.
fn sort_most_recent_first(registrations: &mut [Registration]) {
    registrations.sort_by(|a, b| {
        b.registered_at
            .cmp(&a.registered_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}
