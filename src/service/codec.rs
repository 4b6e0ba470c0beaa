//! Message serialization.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Serialization used for request and response payloads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireFormat {
    /// `serde_json` text.
    Json,
    /// `bincode` binary.
    #[default]
    Binary,
}

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("json codec failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("binary codec failed: {0}")]
    Binary(#[from] bincode::Error),
}

/// A wire format name that is neither `json` nor `binary`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown wire format '{0}'")]
pub struct UnknownWireFormat(pub String);

impl WireFormat {
    pub fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        match self {
            Self::Json => Ok(serde_json::to_vec(value)?),
            Self::Binary => Ok(bincode::serialize(value)?),
        }
    }

    pub fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, CodecError> {
        match self {
            Self::Json => Ok(serde_json::from_slice(bytes)?),
            Self::Binary => Ok(bincode::deserialize(bytes)?),
        }
    }
}

impl fmt::Display for WireFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("json"),
            Self::Binary => f.write_str("binary"),
        }
    }
}

impl FromStr for WireFormat {
    type Err = UnknownWireFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "binary" | "bincode" => Ok(Self::Binary),
            other => Err(UnknownWireFormat(other.to_string())),
        }
    }
}
