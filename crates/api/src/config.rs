//! API configuration.

use common::ServiceConfig;
use user_service_lib::config::UserServiceConfig;

/// API configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Bind address and log level
    pub server: ServiceConfig,
    /// Store and validation settings
    pub users: UserServiceConfig,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            server: ServiceConfig::from_env("user-api", "API"),
            users: UserServiceConfig::from_env(),
        }
    }

    /// Default `EnvFilter` directives; `verbose` forces debug everywhere.
    pub fn log_filter(&self, verbose: bool) -> String {
        if verbose {
            "debug".to_string()
        } else {
            format!("{},tower_http=debug", self.server.log_level)
        }
    }

    /// Override the bind address (CLI flags win over the environment).
    pub fn with_addr(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.server.host = host;
        }
        if let Some(port) = port {
            self.server.port = port;
        }
        self
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            server: ServiceConfig {
                service_name: "user-api".to_string(),
                ..ServiceConfig::default()
            },
            users: UserServiceConfig::default(),
        }
    }
}
