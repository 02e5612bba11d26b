//! Authentication configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Minimum HS256 secret length accepted in production.
pub const MIN_PRODUCTION_SECRET_BYTES: usize = 32;

/// Token signing and password hashing secrets
#[derive(Debug, Deserialize)]
pub struct AuthConfig {
    /// HS256 signing key for bearer tokens
    pub jwt_secret: Secret<String>,

    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: i64,

    /// `iss` claim written into and required from every token
    #[serde(default = "default_issuer")]
    pub issuer: String,

    /// Server-side key mixed into every password digest
    pub password_pepper: Secret<String>,
}

impl AuthConfig {
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let secret = self.jwt_secret.expose_secret();
        if secret.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"));
        }
        if self.password_pepper.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__PASSWORD_PEPPER"));
        }
        if *environment == Environment::Production && secret.len() < MIN_PRODUCTION_SECRET_BYTES {
            return Err(ValidationError::JwtSecretTooShort(MIN_PRODUCTION_SECRET_BYTES));
        }
        if self.token_ttl_secs <= 0 {
            return Err(ValidationError::InvalidTokenTtl);
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: Secret::new(String::new()),
            token_ttl_secs: default_token_ttl(),
            issuer: default_issuer(),
            password_pepper: Secret::new(String::new()),
        }
    }
}

fn default_token_ttl() -> i64 {
    86_400
}

fn default_issuer() -> String {
    "book-dogs".to_string()
}
