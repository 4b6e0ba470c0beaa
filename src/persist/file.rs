//! File-backed session store.

use super::{SessionRecord, SessionStore, StoreError, SESSION_KEY};
use crate::core::Session;
use crate::service::WireFormat;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Stores the session record as one file inside a directory.
///
/// Writes go to a temporary file that is then renamed over the record, so a
/// crash mid-write never leaves a truncated session behind.
#[derive(Clone, Debug)]
pub struct FileSessionStore {
    dir: PathBuf,
    format: WireFormat,
}

impl FileSessionStore {
    /// Create the store, creating `dir` if it does not exist.
    pub fn new(dir: impl Into<PathBuf>, format: WireFormat) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir, format })
    }

    /// Path of the record file.
    pub fn path(&self) -> PathBuf {
        let ext = match self.format {
            WireFormat::Json => "json",
            WireFormat::Binary => "bin",
        };
        self.dir.join(format!("{SESSION_KEY}.{ext}"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>, StoreError> {
        let bytes = match fs::read(self.path()) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let record = SessionRecord::from_bytes(&bytes, self.format)?;
        Ok(Some(record.session))
    }

    fn save(&self, session: &Session) -> Result<(), StoreError> {
        let bytes = SessionRecord::new(session.clone()).to_bytes(self.format)?;
        let path = self.path();
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &path)?;
        Ok(())
    }

    fn erase(&self) -> Result<(), StoreError> {
        match fs::remove_file(self.path()) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
