//! In-memory session store.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

use pathfinder_core::error::DomainError;
use uuid::Uuid;

use crate::domain::explorer::ExplorerSession;

/// Shared handle to one session. The lock is never held across an await.
pub type SessionHandle = Arc<Mutex<ExplorerSession>>;

/// Sessions of this process, keyed by id.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, SessionHandle>>,
}

impl SessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `session`, returning its handle.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the store lock is poisoned.
    pub fn insert(&self, session: ExplorerSession) -> Result<SessionHandle, DomainError> {
        let id = session.id();
        let handle = Arc::new(Mutex::new(session));
        self.sessions
            .write()
            .map_err(|e| DomainError::Infrastructure(format!("session store lock poisoned: {e}")))?
            .insert(id, Arc::clone(&handle));
        Ok(handle)
    }

    /// Looks up a session.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::SessionNotFound` for unknown ids and
    /// `DomainError::Infrastructure` if the store lock is poisoned.
    pub fn get(&self, id: Uuid) -> Result<SessionHandle, DomainError> {
        self.sessions
            .read()
            .map_err(|e| DomainError::Infrastructure(format!("session store lock poisoned: {e}")))?
            .get(&id)
            .cloned()
            .ok_or(DomainError::SessionNotFound(id))
    }

    /// Takes a session out of the store.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::SessionNotFound` for unknown ids and
    /// `DomainError::Infrastructure` if the store lock is poisoned.
    pub fn remove(&self, id: Uuid) -> Result<SessionHandle, DomainError> {
        self.sessions
            .write()
            .map_err(|e| DomainError::Infrastructure(format!("session store lock poisoned: {e}")))?
            .remove(&id)
            .ok_or(DomainError::SessionNotFound(id))
    }

    /// Number of live sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.read().map_or(0, |sessions| sessions.len())
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Locks a session.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the session lock is poisoned.
pub fn lock(handle: &SessionHandle) -> Result<MutexGuard<'_, ExplorerSession>, DomainError> {
    handle
        .lock()
        .map_err(|e| DomainError::Infrastructure(format!("session lock poisoned: {e}")))
}
