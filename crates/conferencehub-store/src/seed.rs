//! Startup seed loading.
//!
//! A missing or unreadable seed file never stops the server: the store
//! simply starts empty.

use std::collections::HashSet;
use std::path::Path;

use tracing::{info, warn};

use conferencehub_entity::session::Session;

/// Read sessions from a JSON array at `path`.
///
/// Returns an empty list when the path is blank, the file is missing, or
/// its contents fail to parse.
pub async fn load_seed(path: impl AsRef<Path>) -> Vec<Session> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        info!("No seed file configured; starting with an empty store");
        return Vec::new();
    }

    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            info!(path = %path.display(), "Seed file not found; starting with an empty store");
            return Vec::new();
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to read seed file; starting with an empty store");
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<Session>>(&raw) {
        Ok(sessions) => {
            info!(path = %path.display(), count = sessions.len(), "Loaded seed sessions");
            sessions
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Seed file is malformed; starting with an empty store");
            Vec::new()
        }
    }
}

/// Drop seed rows whose id is zero or repeats an earlier row.
///
/// Each dropped row is logged at `warn`; the first row with a given id wins.
pub fn sanitize(sessions: Vec<Session>) -> Vec<Session> {
    let mut seen = HashSet::with_capacity(sessions.len());
    sessions
        .into_iter()
        .filter(|session| {
            if session.id.value() == 0 {
                warn!(title = %session.title, "Seed session has no positive id; skipping");
                return false;
            }
            if !seen.insert(session.id) {
                warn!(session_id = %session.id, title = %session.title, "Duplicate seed session id; skipping");
                return false;
            }
            true
        })
        .collect()
}
