//! API configuration

use serde::Deserialize;

use core_kernel::CoreError;
use domain_billing::BillingConfig;

/// API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Log level
    pub log_level: String,
    /// Artificial delay added to every student roster read, in milliseconds
    pub simulated_latency_ms: u64,
    /// Invoice synthesis settings
    pub billing: BillingConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            simulated_latency_ms: 0,
            billing: BillingConfig::default(),
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `VINDYAA_*` environment variables
    ///
    /// Nested billing settings use a double underscore, e.g.
    /// `VINDYAA_BILLING__WINDOW_MONTHS=12`.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                config::Environment::with_prefix("VINDYAA")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Rejects settings the service cannot start with
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.port == 0 {
            return Err(CoreError::configuration("port must be non-zero"));
        }
        self.billing.validate()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
