//! Durable storage of the current session.
//!
//! The state machine persists its session on activation and erases it on
//! deactivation through a [`SessionStore`]. A session is written as a
//! versioned [`SessionRecord`] under the fixed key [`SESSION_KEY`].

use crate::core::Session;
use crate::service::WireFormat;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod error;
mod file;
mod memory;

pub use error::StoreError;
pub use file::FileSessionStore;
pub use memory::{MemorySessionStore, StoreOp};

/// Key under which the session record is stored.
pub const SESSION_KEY: &str = "session";

/// Version identifier for the session record format
pub const RECORD_VERSION: u32 = 1;

/// Key-value storage for a single session.
pub trait SessionStore: Send + Sync {
    /// Previously saved session, or `None` if nothing is stored.
    fn load(&self) -> Result<Option<Session>, StoreError>;

    /// Store `session`, replacing whatever was stored before.
    fn save(&self, session: &Session) -> Result<(), StoreError>;

    /// Remove the stored session. Erasing an empty store succeeds.
    fn erase(&self) -> Result<(), StoreError>;
}

/// Serializable envelope around a persisted session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Record format version
    pub version: u32,

    /// When the record was written
    pub saved_at: DateTime<Utc>,

    pub session: Session,
}

impl SessionRecord {
    pub fn new(session: Session) -> Self {
        Self {
            version: RECORD_VERSION,
            saved_at: Utc::now(),
            session,
        }
    }

    pub fn to_bytes(&self, format: WireFormat) -> Result<Vec<u8>, StoreError> {
        Ok(format.encode(self)?)
    }

    /// Decode a record, rejecting versions this build does not understand.
    pub fn from_bytes(bytes: &[u8], format: WireFormat) -> Result<Self, StoreError> {
        let record: SessionRecord = format.decode(bytes)?;
        if record.version != RECORD_VERSION {
            return Err(StoreError::UnsupportedVersion {
                found: record.version,
                supported: RECORD_VERSION,
            });
        }
        Ok(record)
    }
}
