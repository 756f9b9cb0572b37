//! User service configuration.

use std::env;

use common::DatabaseConfig;
use domain::ValidationPolicy;

/// Environment prefix for user service settings
pub const ENV_PREFIX: &str = "USER_SERVICE";

/// User service configuration.
#[derive(Debug, Clone, Default)]
pub struct UserServiceConfig {
    /// Store connection settings
    pub database: DatabaseConfig,
    /// Field rule revision applied on create and update
    pub validation_policy: ValidationPolicy,
}

impl UserServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            database: DatabaseConfig::from_env(ENV_PREFIX),
            validation_policy: policy_from_env(),
        }
    }
}

/// Read `VALIDATION_POLICY`, keeping the default on unknown values.
fn policy_from_env() -> ValidationPolicy {
    match env::var("VALIDATION_POLICY") {
        Ok(raw) => raw.parse().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "Falling back to default validation policy");
            ValidationPolicy::default()
        }),
        Err(_) => ValidationPolicy::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_strict_in_memory() {
        let config = UserServiceConfig::default();
        assert_eq!(config.validation_policy, ValidationPolicy::Strict);
        assert!(config.database.is_in_memory());
    }
}
