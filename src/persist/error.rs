//! Session store error types.

use crate::service::CodecError;
use thiserror::Error;

/// Errors that can occur while saving, loading or erasing a session
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing medium failed
    #[error("session store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The stored record could not be encoded or decoded
    #[error("session record codec failed: {0}")]
    Codec(#[from] CodecError),

    /// Record version is not supported by this version
    #[error("Unsupported session record version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },
}
