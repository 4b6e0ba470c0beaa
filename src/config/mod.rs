//! Client configuration.
//!
//! A [`ClientConfig`] fixes the service endpoint, the payload serialization
//! and how much transition history the machine keeps. It is built through
//! [`ClientConfigBuilder`], which accumulates every violation using
//! `stillwater::Validation`, or read from the environment.
//!
//! # Example
//!
//! ```rust
//! use pagekit::config::ClientConfig;
//! use pagekit::service::WireFormat;
//!
//! let config = ClientConfig::builder()
//!     .endpoint("https://pages.example.com")
//!     .wire_format(WireFormat::Json)
//!     .build()
//!     .unwrap();
//! assert_eq!(config.endpoint(), "https://pages.example.com");
//! ```

pub mod builder;
pub mod error;

pub use builder::ClientConfigBuilder;
pub use error::{ConfigError, ConfigViolation};

use crate::service::WireFormat;
use serde::{Deserialize, Serialize};

pub const DEFAULT_ENDPOINT: &str = "https://localhost:8080";
pub const DEFAULT_HISTORY_LIMIT: usize = 64;

pub const ENV_ENDPOINT: &str = "PAGES_ENDPOINT";
pub const ENV_WIRE_FORMAT: &str = "PAGES_WIRE_FORMAT";
pub const ENV_HISTORY_LIMIT: &str = "PAGES_HISTORY_LIMIT";

/// Validated client configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    endpoint: String,
    wire_format: WireFormat,
    history_limit: usize,
}

impl ClientConfig {
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Read configuration from `PAGES_*` environment variables.
    ///
    /// Missing or unparseable values fall back to their defaults; the result
    /// is then validated like any built configuration.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = ClientConfigBuilder::new();
        if let Some(endpoint) = lookup(ENV_ENDPOINT) {
            builder = builder.endpoint(endpoint);
        }
        if let Some(format) = lookup(ENV_WIRE_FORMAT).and_then(|v| v.parse().ok()) {
            builder = builder.wire_format(format);
        }
        if let Some(limit) = lookup(ENV_HISTORY_LIMIT).and_then(|v| v.trim().parse().ok()) {
            builder = builder.history_limit(limit);
        }
        builder.build()
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn wire_format(&self) -> WireFormat {
        self.wire_format
    }

    pub fn history_limit(&self) -> usize {
        self.history_limit
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            wire_format: WireFormat::default(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}
