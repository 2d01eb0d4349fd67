//! In-memory session store. Nothing survives a restart.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::session::{Session, SessionError};

/// Sessions keyed by id. Cheap to clone; all clones share the same map.
/// Inserting past `capacity` evicts the oldest session.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, Session>>>,
    capacity: usize,
}

impl SessionStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            capacity: capacity.max(1),
        }
    }

    pub async fn insert(&self, session: Session) -> Uuid {
        let id = session.id;
        let mut sessions = self.inner.write().await;

        while sessions.len() >= self.capacity && !sessions.contains_key(&id) {
            let oldest = sessions
                .values()
                .min_by_key(|s| s.created_at)
                .map(|s| s.id);
            match oldest {
                Some(oldest) => {
                    debug!(session_id = %oldest, "Evicting oldest session");
                    sessions.remove(&oldest);
                }
                None => break,
            }
        }

        sessions.insert(id, session);
        id
    }

    /// Returns a snapshot of the session.
    pub async fn get(&self, id: Uuid) -> Result<Session, SessionError> {
        self.inner
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(SessionError::NotFound(id))
    }

    /// Applies `f` to the session under the write lock. `f` must not block.
    pub async fn update<F, T>(&self, id: Uuid, f: F) -> Result<T, SessionError>
    where
        F: FnOnce(&mut Session) -> Result<T, SessionError>,
    {
        let mut sessions = self.inner.write().await;
        let session = sessions.get_mut(&id).ok_or(SessionError::NotFound(id))?;
        f(session)
    }

    pub async fn remove(&self, id: Uuid) -> Option<Session> {
        self.inner.write().await.remove(&id)
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }
}
