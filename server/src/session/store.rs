//! In-memory session store.
//!
//! Sessions live in a `DashMap` keyed by token. Expired sessions are removed
//! on lookup and by a periodic sweep.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use hl_common::{Role, SessionActor};
use uuid::Uuid;

use crate::permissions::PermissionContext;

/// One signed-in admin.
#[derive(Debug, Clone)]
pub struct Session {
    /// Session token.
    pub id: Uuid,
    pub context: PermissionContext,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Thread-safe session registry.
#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Arc<DashMap<Uuid, Session>>,
    ttl: chrono::Duration,
}

impl SessionStore {
    #[must_use]
    pub fn new(ttl_secs: i64) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            ttl: chrono::Duration::seconds(ttl_secs),
        }
    }

    /// Start a session for a new actor with `role`.
    pub fn create(&self, role: Role) -> Session {
        self.create_for(SessionActor::new(Uuid::now_v7(), role))
    }

    /// Start a session for a known actor.
    pub fn create_for(&self, actor: SessionActor) -> Session {
        let now = Utc::now();
        let session = Session {
            id: Uuid::now_v7(),
            context: PermissionContext::new(actor),
            created_at: now,
            expires_at: now + self.ttl,
        };
        self.sessions.insert(session.id, session.clone());
        tracing::info!(
            session_id = %session.id,
            actor_id = %actor.id,
            role = %actor.role,
            "Admin session started"
        );
        session
    }

    /// Look up a live session.
    pub fn get(&self, id: Uuid) -> Option<Session> {
        let session = self.sessions.get(&id).map(|s| s.value().clone())?;
        if session.is_expired(Utc::now()) {
            self.sessions.remove(&id);
            return None;
        }
        Some(session)
    }

    /// Rebuild a session's context for a new role, keeping the actor ID.
    ///
    /// Requests already holding the old context finish with it.
    pub fn switch_role(&self, id: Uuid, role: Role) -> Option<Session> {
        let mut entry = self.sessions.get_mut(&id)?;
        if entry.is_expired(Utc::now()) {
            drop(entry);
            self.sessions.remove(&id);
            return None;
        }
        let actor = SessionActor::new(entry.context.actor().id, role);
        entry.context = PermissionContext::new(actor);
        tracing::info!(
            session_id = %id,
            actor_id = %actor.id,
            role = %role,
            "Admin session role switched"
        );
        Some(entry.value().clone())
    }

    /// End a session. Returns whether it existed.
    pub fn remove(&self, id: Uuid) -> bool {
        self.sessions.remove(&id).is_some()
    }

    /// Drop every expired session.
    pub fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let before = self.sessions.len();
        self.sessions.retain(|_, s| !s.is_expired(now));
        before.saturating_sub(self.sessions.len())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

/// Periodically purge expired sessions.
pub fn spawn_session_sweeper(store: SessionStore, every: Duration) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            let purged = store.purge_expired();
            if purged > 0 {
                tracing::debug!(purged, "Purged expired admin sessions");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use hl_common::Permission;

    use super::*;

    #[test]
    fn test_create_and_get() {
        let store = SessionStore::new(60);
        let session = store.create(Role::Support);
        let found = store.get(session.id).unwrap();
        assert_eq!(found.context.role(), Role::Support);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_unknown_session() {
        let store = SessionStore::new(60);
        assert!(store.get(Uuid::now_v7()).is_none());
    }

    #[test]
    fn test_expired_session_is_gone() {
        let store = SessionStore::new(0);
        let session = store.create(Role::Owner);
        assert!(store.get(session.id).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_switch_role_rebuilds_context() {
        let store = SessionStore::new(60);
        let session = store.create(Role::AdManager);
        let old = session.context.clone();
        assert!(!old.can(Permission::BanUsers));

        let switched = store.switch_role(session.id, Role::Moderator).unwrap();
        assert_eq!(switched.context.actor().id, old.actor().id);
        assert!(switched.context.can(Permission::BanUsers));
        // The context captured before the switch is unchanged.
        assert!(!old.can(Permission::BanUsers));
    }

    #[test]
    fn test_remove() {
        let store = SessionStore::new(60);
        let session = store.create(Role::Admin);
        assert!(store.remove(session.id));
        assert!(!store.remove(session.id));
    }

    #[test]
    fn test_purge_expired() {
        let live = SessionStore::new(60);
        live.create(Role::Admin);
        assert_eq!(live.purge_expired(), 0);

        let stale = SessionStore::new(-1);
        stale.create(Role::Admin);
        stale.create(Role::Support);
        assert_eq!(stale.purge_expired(), 2);
    }
}
