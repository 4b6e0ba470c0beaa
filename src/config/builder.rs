//! Builder for [`ClientConfig`].

use super::error::{ConfigError, ConfigViolation};
use super::ClientConfig;
use crate::service::WireFormat;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check = Validation<(), NonEmptyVec<ConfigViolation>>;

/// Fluent builder that validates the whole configuration at once.
///
/// `build()` reports every violation, not just the first.
#[derive(Clone, Debug)]
pub struct ClientConfigBuilder {
    endpoint: String,
    wire_format: WireFormat,
    history_limit: usize,
}

impl ClientConfigBuilder {
    pub fn new() -> Self {
        Self {
            endpoint: super::DEFAULT_ENDPOINT.to_string(),
            wire_format: WireFormat::default(),
            history_limit: super::DEFAULT_HISTORY_LIMIT,
        }
    }

    /// Set the service endpoint URL.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the payload serialization.
    pub fn wire_format(mut self, format: WireFormat) -> Self {
        self.wire_format = format;
        self
    }

    /// Set how many transitions the machine remembers.
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    /// Validate and build the configuration.
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        match self.validate() {
            Validation::Success(()) => Ok(ClientConfig {
                endpoint: self.endpoint.trim().to_string(),
                wire_format: self.wire_format,
                history_limit: self.history_limit,
            }),
            Validation::Failure(errors) => Err(ConfigError {
                violations: errors.iter().cloned().collect(),
            }),
        }
    }

    fn validate(&self) -> Check {
        let endpoint = self.endpoint.trim();
        let checks: Vec<Check> = vec![
            if endpoint.is_empty() {
                Validation::fail(ConfigViolation::EmptyEndpoint)
            } else if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
                Validation::fail(ConfigViolation::UnsupportedScheme {
                    endpoint: endpoint.to_string(),
                })
            } else {
                Validation::success(())
            },
            if self.history_limit == 0 {
                Validation::fail(ConfigViolation::ZeroHistoryLimit)
            } else {
                Validation::success(())
            },
        ];

        Validation::all_vec(checks).map(|_| ())
    }
}

impl Default for ClientConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_build() {
        let config = ClientConfigBuilder::new().build().unwrap();
        assert_eq!(config.endpoint(), "https://localhost:8080");
        assert_eq!(config.wire_format(), WireFormat::Binary);
        assert_eq!(config.history_limit(), 64);
    }

    #[test]
    fn accumulates_all_violations() {
        let err = ClientConfigBuilder::new()
            .endpoint("")
            .history_limit(0)
            .build()
            .unwrap_err();

        assert_eq!(
            err.violations,
            vec![
                ConfigViolation::EmptyEndpoint,
                ConfigViolation::ZeroHistoryLimit
            ]
        );
    }

    #[test]
    fn rejects_non_http_endpoint() {
        let err = ClientConfigBuilder::new()
            .endpoint("ftp://pages.example.com")
            .build()
            .unwrap_err();

        assert_eq!(err.violations.len(), 1);
        assert!(err.to_string().contains("ftp://pages.example.com"));
    }

    #[test]
    fn stores_trimmed_endpoint() {
        let config = ClientConfigBuilder::new()
            .endpoint("  https://pages.example.com \n")
            .build()
            .unwrap();

        assert_eq!(config.endpoint(), "https://pages.example.com");
    }
}
