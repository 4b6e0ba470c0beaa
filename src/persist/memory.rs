//! Process-local session store.

use super::{SessionRecord, SessionStore, StoreError, SESSION_KEY};
use crate::core::Session;
use crate::service::WireFormat;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Operation applied to a [`MemorySessionStore`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreOp {
    Save(String),
    Erase,
}

#[derive(Default)]
struct Inner {
    entries: HashMap<String, Vec<u8>>,
    ops: Vec<StoreOp>,
}

/// In-memory store.
///
/// Clones share the same storage, so a handle kept by the caller observes
/// what the state machine wrote. Every save and erase is logged in order.
#[derive(Clone, Default)]
pub struct MemorySessionStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `session`, as if saved by an earlier run.
    pub fn with_session(session: &Session) -> Result<Self, StoreError> {
        let store = Self::new();
        let bytes = SessionRecord::new(session.clone()).to_bytes(WireFormat::Binary)?;
        store.lock().entries.insert(SESSION_KEY.to_string(), bytes);
        Ok(store)
    }

    /// Saves and erases applied so far, oldest first. Seeding is not logged.
    pub fn ops(&self) -> Vec<StoreOp> {
        self.lock().ops.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<Session>, StoreError> {
        self.lock()
            .entries
            .get(SESSION_KEY)
            .map(|bytes| SessionRecord::from_bytes(bytes, WireFormat::Binary))
            .transpose()
            .map(|record| record.map(|r| r.session))
    }

    fn save(&self, session: &Session) -> Result<(), StoreError> {
        let bytes = SessionRecord::new(session.clone()).to_bytes(WireFormat::Binary)?;
        let mut inner = self.lock();
        inner.entries.insert(SESSION_KEY.to_string(), bytes);
        inner.ops.push(StoreOp::Save(session.token.clone()));
        Ok(())
    }

    fn erase(&self) -> Result<(), StoreError> {
        let mut inner = self.lock();
        inner.entries.remove(SESSION_KEY);
        inner.ops.push(StoreOp::Erase);
        Ok(())
    }
}
