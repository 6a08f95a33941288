//! Session state for the current user.
//!
//! A session records who is using the client: a user id, an optional
//! email, and whether this is a guest session. It lives as a small JSON
//! file under the data directory and is removed on sign-out. Guest
//! sessions may browse and search but never own favorites.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

const SESSION_FILE: &str = "session.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub user_id: String,
    pub email: Option<String>,
    #[serde(default)]
    pub guest: bool,
}

impl Session {
    /// Session for a signed-in account.
    pub fn account(user_id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            email: Some(email.into()),
            guest: false,
        }
    }

    /// Anonymous guest session with a throwaway user id.
    pub fn guest() -> Self {
        Self {
            user_id: format!("guest-{}", Uuid::new_v4()),
            email: None,
            guest: true,
        }
    }

    pub fn display_name(&self) -> &str {
        self.email.as_deref().unwrap_or(&self.user_id)
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session file error: {0}")]
    Io(#[from] std::io::Error),
    #[error("session file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Loads, saves and clears the persisted session.
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(SESSION_FILE)
    }

    /// Returns the stored session, or `None` when signed out.
    pub fn load(&self) -> Result<Option<Session>, SessionError> {
        let path = self.path();
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&contents)?))
    }

    pub fn save(&self, session: &Session) -> Result<(), SessionError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path(), serde_json::to_string_pretty(session)?)?;
        Ok(())
    }

    /// Removes the session file; signing out twice is not an error.
    pub fn clear(&self) -> Result<(), SessionError> {
        let path = self.path();
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_load_round_trip() {
        let dir = tempdir().unwrap();
        let store = SessionStore::new(dir.path());

        let session = Session::account("uid-1", "user@example.com");
        store.save(&session).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded, session);
        assert_eq!(loaded.display_name(), "user@example.com");
    }

    #[test]
    fn load_without_file_is_none() {
        let dir = tempdir().unwrap();
        let store = SessionStore::new(dir.path());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn clear_removes_session_and_is_idempotent() {
        let dir = tempdir().unwrap();
        let store = SessionStore::new(dir.path());

        store.save(&Session::guest()).unwrap();
        assert!(store.load().unwrap().is_some());

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        store.clear().unwrap();
    }

    #[test]
    fn guest_sessions_are_flagged_and_unique() {
        let a = Session::guest();
        let b = Session::guest();
        assert!(a.guest);
        assert!(a.email.is_none());
        assert_ne!(a.user_id, b.user_id);
        assert!(a.user_id.starts_with("guest-"));
    }
}
