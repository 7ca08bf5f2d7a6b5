use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;

use crate::session::{Session, SessionId};

/// Live sessions keyed by id.
///
/// Created once at startup and handed to the gateway state. Clones share the
/// same table.
pub struct ConnectionRegistry {
    sessions: Arc<DashMap<SessionId, Session>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        ConnectionRegistry {
            sessions: Arc::new(DashMap::new()),
        }
    }

    /// Register a session. Returns `false` and leaves the table untouched when
    /// the id is already present.
    pub fn add(&self, id: SessionId, session: Session) -> bool {
        match self.sessions.entry(id) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(session);
                true
            }
        }
    }

    /// Remove a session. Unknown ids are a no-op.
    pub fn remove(&self, id: &SessionId) -> Option<Session> {
        self.sessions.remove(id).map(|(_, session)| session)
    }

    pub fn get(&self, id: &SessionId) -> Option<Session> {
        self.sessions.get(id).map(|s| s.clone())
    }

    pub fn contains(&self, id: &SessionId) -> bool {
        self.sessions.contains_key(id)
    }

    pub fn size(&self) -> usize {
        self.sessions.len()
    }

    /// Register a session for as long as the returned guard lives.
    ///
    /// `None` when the id is already taken. The existing entry is left alone
    /// and no guard exists that could later remove it.
    pub fn register(&self, session: &Session) -> Option<Registration> {
        self.add(session.id(), session.clone()).then(|| Registration {
            registry: self.clone(),
            id: session.id(),
        })
    }
}

/// Ownership of one registry entry. Dropping it removes the entry.
pub struct Registration {
    registry: ConnectionRegistry,
    id: SessionId,
}

impl Registration {
    pub fn id(&self) -> SessionId {
        self.id
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        self.registry.remove(&self.id);
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for ConnectionRegistry {
    fn clone(&self) -> Self {
        ConnectionRegistry {
            sessions: Arc::clone(&self.sessions),
        }
    }
}
