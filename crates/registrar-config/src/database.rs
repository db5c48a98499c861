//! Database connection settings.
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `DATABASE_MAX_CONNECTIONS`: pool size (default 10)
//! - `DATABASE_ACQUIRE_TIMEOUT_SECS`: how long a request waits for a
//!   connection before the store is reported unavailable (default 10)

use std::time::Duration;

use crate::env::{Lookup, parsed_in, process_env, required_in};
use crate::error::ConfigError;

#[derive(Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&process_env)
    }

    pub(crate) fn from_lookup(lookup: Lookup<'_>) -> Result<Self, ConfigError> {
        Ok(Self {
            url: required_in(lookup, "DATABASE_URL")?,
            max_connections: parsed_in(lookup, "DATABASE_MAX_CONNECTIONS", 10)?,
            acquire_timeout: Duration::from_secs(parsed_in(
                lookup,
                "DATABASE_ACQUIRE_TIMEOUT_SECS",
                10,
            )?),
        })
    }

    /// The connection string with any password replaced, safe for logs.
    pub fn redacted_url(&self) -> String {
        redact_url(&self.url)
    }
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.redacted_url())
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout", &self.acquire_timeout)
            .finish()
    }
}

fn redact_url(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    match rest.rsplit_once('@') {
        Some((_, host)) => format!("{scheme}://***:***@{host}"),
        None => url.to_string(),
    }
}
