//! Application configuration module
//!
//! Configuration is read from environment variables with the `BOOK_DOGS`
//! prefix, using `__` to separate nested keys. A `.env` file is honoured
//! when present.
//!
//! # Example
//!
//! ```no_run
//! use book_dogs::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod auth;
mod database;
mod error;
mod server;

pub use auth::{AuthConfig, MIN_PRODUCTION_SECRET_BYTES};
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    pub database: DatabaseConfig,

    pub auth: AuthConfig,
}

impl AppConfig {
    /// Load configuration from the environment.
    ///
    /// - `BOOK_DOGS__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `BOOK_DOGS__DATABASE__URL=...` -> `database.url = ...`
    /// - `BOOK_DOGS__AUTH__JWT_SECRET=...` -> `auth.jwt_secret = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a required key is missing or a value
    /// cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("BOOK_DOGS")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Semantic validation of every section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate(&self.server.environment)?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::env;
    use std::sync::Mutex;

    // Environment variables are process-global.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const KEYS: &[&str] = &[
        "BOOK_DOGS__DATABASE__URL",
        "BOOK_DOGS__AUTH__JWT_SECRET",
        "BOOK_DOGS__AUTH__PASSWORD_PEPPER",
        "BOOK_DOGS__AUTH__TOKEN_TTL_SECS",
        "BOOK_DOGS__SERVER__PORT",
        "BOOK_DOGS__SERVER__ENVIRONMENT",
    ];

    fn set_minimal_env() {
        env::set_var("BOOK_DOGS__DATABASE__URL", "postgresql://test@localhost/book_dogs");
        env::set_var("BOOK_DOGS__AUTH__JWT_SECRET", "test-secret");
        env::set_var("BOOK_DOGS__AUTH__PASSWORD_PEPPER", "test-pepper");
    }

    fn clear_env() {
        for key in KEYS {
            env::remove_var(key);
        }
    }

    #[test]
    fn loads_minimal_environment_with_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        set_minimal_env();

        let config = AppConfig::load().unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.url, "postgresql://test@localhost/book_dogs");
        assert_eq!(config.auth.jwt_secret.expose_secret(), "test-secret");
        assert_eq!(config.auth.token_ttl_secs, 86_400);
        assert!(config.validate().is_ok());
        assert!(!config.is_production());

        clear_env();
    }

    #[test]
    fn nested_overrides_are_applied() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        set_minimal_env();
        env::set_var("BOOK_DOGS__SERVER__PORT", "9090");
        env::set_var("BOOK_DOGS__AUTH__TOKEN_TTL_SECS", "600");

        let config = AppConfig::load().unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.auth.token_ttl_secs, 600);

        clear_env();
    }

    #[test]
    fn missing_secret_fails_to_load() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("BOOK_DOGS__DATABASE__URL", "postgresql://test@localhost/book_dogs");

        assert!(matches!(AppConfig::load(), Err(ConfigError::LoadError(_))));

        clear_env();
    }

    #[test]
    fn production_rejects_short_secret() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        set_minimal_env();
        env::set_var("BOOK_DOGS__SERVER__ENVIRONMENT", "production");

        let config = AppConfig::load().unwrap();
        assert!(config.is_production());
        assert!(matches!(
            config.validate(),
            Err(ValidationError::JwtSecretTooShort(_))
        ));

        clear_env();
    }
}
