//! Session operations

use chrono::Utc;

use super::{read, write, MemoryStore, SessionStore};
use crate::error::Result;
use crate::models::{new_id, Session, User};

impl SessionStore for MemoryStore {
    fn create_session(&self, user: &User) -> Result<Session> {
        let session = Session {
            token: new_id(),
            user_id: user.id.clone(),
            user_name: user.name.clone(),
            created_at: Utc::now(),
        };

        let mut sessions = write(&self.inner.sessions, "sessions")?;

        // Clean up expired sessions while we're here
        sessions.retain(|_, s| !s.is_expired());

        sessions.insert(session.token.clone(), session.clone());
        Ok(session)
    }

    fn get_session(&self, token: &str) -> Result<Option<Session>> {
        let sessions = read(&self.inner.sessions, "sessions")?;
        Ok(sessions.get(token).filter(|s| !s.is_expired()).cloned())
    }

    fn delete_session(&self, token: &str) -> Result<bool> {
        let mut sessions = write(&self.inner.sessions, "sessions")?;
        Ok(sessions.remove(token).is_some())
    }
}
