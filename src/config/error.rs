//! Configuration errors.

use thiserror::Error;

/// A single configuration problem.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigViolation {
    #[error("endpoint is empty")]
    EmptyEndpoint,

    #[error("endpoint '{endpoint}' must start with http:// or https://")]
    UnsupportedScheme { endpoint: String },

    #[error("history limit must be greater than zero")]
    ZeroHistoryLimit,
}

/// Every violation found while building a configuration.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("invalid configuration: {}", render(.violations))]
pub struct ConfigError {
    pub violations: Vec<ConfigViolation>,
}

fn render(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
