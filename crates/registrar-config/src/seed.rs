//! First-run default admin account.
//!
//! The seeded account uses well-known credentials unless
//! `SEED_ADMIN_PASSWORD` is set. Only suitable for demo environments.

use crate::env::{flag, optional};
use crate::error::ConfigError;

pub const DEFAULT_ADMIN_EMAIL: &str = "admin@university.edu";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
pub const DEFAULT_ADMIN_NAME: &str = "Admin User";

#[derive(Clone)]
pub struct SeedConfig {
    pub enabled: bool,
    pub admin_email: String,
    pub admin_password: String,
    pub admin_name: String,
}

impl SeedConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            enabled: flag("SEED_DEFAULT_ADMIN", true)?,
            admin_email: optional("SEED_ADMIN_EMAIL")
                .unwrap_or_else(|| DEFAULT_ADMIN_EMAIL.to_string()),
            admin_password: optional("SEED_ADMIN_PASSWORD")
                .unwrap_or_else(|| DEFAULT_ADMIN_PASSWORD.to_string()),
            admin_name: optional("SEED_ADMIN_NAME").unwrap_or_else(|| DEFAULT_ADMIN_NAME.to_string()),
        })
    }

    pub fn uses_default_password(&self) -> bool {
        self.admin_password == DEFAULT_ADMIN_PASSWORD
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            admin_email: DEFAULT_ADMIN_EMAIL.to_string(),
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
            admin_name: DEFAULT_ADMIN_NAME.to_string(),
        }
    }
}

impl std::fmt::Debug for SeedConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeedConfig")
            .field("enabled", &self.enabled)
            .field("admin_email", &self.admin_email)
            .field("admin_password", &"***")
            .field("admin_name", &self.admin_name)
            .finish()
    }
}
