use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use validator::Validate;

/// Failure to assemble a usable [`ServerConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("invalid configuration: {0}")]
    Invalid(#[from] validator::ValidationErrors),
}

/// Configuration options of the catalog server.
///
/// Loaded from `config/default.yaml`, an optional `config/{APP_ENV}.yaml`
/// and `APP_*` environment variables, in that order.
#[derive(Clone, Debug, Deserialize, Validate)]
pub struct ServerConfig {
    /// Path of the SQLite database file.
    #[validate(length(min = 1))]
    pub database_url: String,
    /// Interface the HTTP server binds to.
    #[validate(length(min = 1))]
    pub address: String,
    #[validate(range(min = 1))]
    pub port: u16,
    /// Glob passed to Tera when loading templates.
    #[validate(length(min = 1))]
    pub templates_dir: String,
    /// Directory served under `/assets`.
    pub assets_dir: String,
    /// Signing key material for flash message cookies.
    #[validate(length(min = 64))]
    pub secret: String,
}

impl ServerConfig {
    /// Read the layered configuration for the environment named by `APP_ENV`.
    pub fn load() -> Result<Self, ConfigError> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
        Self::load_from("config", &app_env)
    }

    /// Read `{dir}/default.yaml`, then `{dir}/{app_env}.yaml` if present,
    /// then `APP_*` environment variables.
    pub fn load_from(dir: &str, app_env: &str) -> Result<Self, ConfigError> {
        let config: ServerConfig = Config::builder()
            .add_source(File::with_name(&format!("{dir}/default")))
            .add_source(File::with_name(&format!("{dir}/{app_env}")).required(false))
            .add_source(Environment::with_prefix("APP"))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_default_file() {
        let config = ServerConfig::load_from("config", "missing-env").unwrap();
        assert_eq!(config.templates_dir, "templates/**/*");
        assert!(config.port > 0);
    }

    #[test]
    fn env_file_overrides_default() {
        let dir = tempfile::tempdir().unwrap();
        let default = std::fs::read_to_string("config/default.yaml").unwrap();
        std::fs::write(dir.path().join("default.yaml"), default).unwrap();
        std::fs::write(dir.path().join("staging.yaml"), "port: 9090\n").unwrap();

        let config = ServerConfig::load_from(dir.path().to_str().unwrap(), "staging").unwrap();
        assert_eq!(config.port, 9090);
    }

    #[test]
    fn short_secret_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let default = std::fs::read_to_string("config/default.yaml").unwrap();
        std::fs::write(dir.path().join("default.yaml"), default).unwrap();
        std::fs::write(dir.path().join("weak.yaml"), "secret: short\n").unwrap();

        let result = ServerConfig::load_from(dir.path().to_str().unwrap(), "weak");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }
}
