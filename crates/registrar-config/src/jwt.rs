use crate::env::{Lookup, parsed_in, process_env, required_in};
use crate::error::ConfigError;

/// Tokens live for 24 hours unless `JWT_EXPIRY` says otherwise.
pub const DEFAULT_TOKEN_EXPIRY_SECS: i64 = 24 * 60 * 60;

#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub token_expiry: i64,
}

impl JwtConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&process_env)
    }

    pub(crate) fn from_lookup(lookup: Lookup<'_>) -> Result<Self, ConfigError> {
        let secret = required_in(lookup, "JWT_SECRET")?;
        if secret.len() < 32 {
            tracing::warn!("JWT_SECRET is shorter than 32 characters");
        }

        let token_expiry = parsed_in(lookup, "JWT_EXPIRY", DEFAULT_TOKEN_EXPIRY_SECS)?;
        if token_expiry <= 0 {
            return Err(ConfigError::Invalid {
                var: "JWT_EXPIRY",
                reason: "must be a positive number of seconds".to_string(),
            });
        }

        Ok(Self {
            secret,
            token_expiry,
        })
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"***")
            .field("token_expiry", &self.token_expiry)
            .finish()
    }
}
