// Engine configuration

use serde::{Deserialize, Serialize};
use sieve_config::{ConfigError, ConfigManager, ENV_PREFIX};
use sieve_http_client::HttpClientConfig;
use std::time::Duration;

use crate::validators::{DEFAULT_MAX_REDIRECTS, DEFAULT_TIMEOUT};

/// Engine defaults applied through [`ValidationBuilder::config`](crate::ValidationBuilder::config).
///
/// Keys read from a [`ConfigManager`] (or `SIEVE_*` environment variables):
///
/// | key | default |
/// |---|---|
/// | `use_ambient_request_data` | `false` |
/// | `throw_on_failure` | `false` |
/// | `verification_timeout_secs` | `60` |
/// | `verification_max_redirects` | `10` |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Fall back to the request parameters when no input data is given.
    pub use_ambient_request_data: bool,
    /// Return an error from `validate()` when any field fails.
    pub throw_on_failure: bool,
    pub verification_timeout_secs: u64,
    pub verification_max_redirects: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            use_ambient_request_data: false,
            throw_on_failure: false,
            verification_timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            verification_max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }
}

impl ValidationConfig {
    /// Read the engine keys from a manager; missing keys keep their defaults.
    pub fn from_manager(manager: &ConfigManager) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            use_ambient_request_data: manager
                .get_opt("use_ambient_request_data")?
                .unwrap_or(defaults.use_ambient_request_data),
            throw_on_failure: manager
                .get_opt("throw_on_failure")?
                .unwrap_or(defaults.throw_on_failure),
            verification_timeout_secs: manager
                .get_opt("verification_timeout_secs")?
                .unwrap_or(defaults.verification_timeout_secs),
            verification_max_redirects: manager
                .get_opt("verification_max_redirects")?
                .unwrap_or(defaults.verification_max_redirects),
        };
        config.validate()?;
        Ok(config)
    }

    /// Read `SIEVE_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let manager = ConfigManager::with_prefix(ENV_PREFIX);
        manager.load_env()?;
        Self::from_manager(&manager)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.verification_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "verification_timeout_secs".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    pub fn verification_timeout(&self) -> Duration {
        Duration::from_secs(self.verification_timeout_secs)
    }

    /// Client settings for the HTTP token verifier.
    pub fn http_client_config(&self) -> HttpClientConfig {
        HttpClientConfig::builder()
            .timeout(self.verification_timeout())
            .follow_redirects(self.verification_max_redirects > 0)
            .max_redirects(self.verification_max_redirects)
            .build()
    }
}
