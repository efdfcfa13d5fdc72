//! Session storage seam.
//!
//! Production uses the Postgres-backed repository in the server crate.
//! [`MemorySessionStore`] backs tests and local experiments.

use async_trait::async_trait;
use chrono::Utc;
use league_portal_core::Result;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::error::AuthenticationError;
use crate::session::{Session, SessionId};

/// Storage for sessions.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Finds a session by id.
    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, AuthenticationError>;

    /// Stores a new session.
    async fn create(&self, session: &Session) -> Result<(), AuthenticationError>;

    /// Deletes a session by id.
    async fn delete(&self, id: &SessionId) -> Result<(), AuthenticationError>;

    /// Deletes every expired session, returning how many were removed.
    async fn delete_expired(&self) -> Result<u64, AuthenticationError>;
}

/// In-memory session store.
#[derive(Clone, Default)]
pub struct MemorySessionStore {
    sessions: Arc<Mutex<HashMap<SessionId, Session>>>,
}

impl MemorySessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored sessions.
    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    /// Returns true if no sessions are stored.
    pub async fn is_empty(&self) -> bool {
        self.sessions.lock().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, AuthenticationError> {
        Ok(self.sessions.lock().await.get(id).cloned())
    }

    async fn create(&self, session: &Session) -> Result<(), AuthenticationError> {
        self.sessions
            .lock()
            .await
            .insert(session.id().clone(), session.clone());
        Ok(())
    }

    async fn delete(&self, id: &SessionId) -> Result<(), AuthenticationError> {
        self.sessions.lock().await.remove(id);
        Ok(())
    }

    async fn delete_expired(&self) -> Result<u64, AuthenticationError> {
        let now = Utc::now();
        let mut sessions = self.sessions.lock().await;
        let before = sessions.len();
        sessions.retain(|_, session| session.expires_at() > now);
        let removed = (before - sessions.len()) as u64;
        tracing::debug!(removed, "purged expired sessions");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::RoleSet;
    use chrono::Duration;

    fn session(id: &str, duration: Duration) -> Session {
        Session::new(id.into(), "acct".to_string(), RoleSet::member(), duration)
    }

    #[tokio::test]
    async fn create_then_find() {
        let store = MemorySessionStore::new();
        let stored = session("a", Duration::hours(1));
        store.create(&stored).await.unwrap();

        let found = store.find_by_id(&"a".into()).await.unwrap();
        assert_eq!(found, Some(stored));
        assert!(store.find_by_id(&"b".into()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_expired_keeps_live_sessions() {
        let store = MemorySessionStore::new();
        store.create(&session("live", Duration::hours(1))).await.unwrap();
        store.create(&session("dead", Duration::seconds(-5))).await.unwrap();

        assert_eq!(store.delete_expired().await.unwrap(), 1);
        assert_eq!(store.len().await, 1);
        assert!(store.find_by_id(&"live".into()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = MemorySessionStore::new();
        store.create(&session("a", Duration::hours(1))).await.unwrap();
        store.delete(&"a".into()).await.unwrap();
        store.delete(&"a".into()).await.unwrap();
        assert!(store.is_empty().await);
    }
}
