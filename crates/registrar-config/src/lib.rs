//! # Registrar Config
//!
//! Configuration types for the Registrar API.
//!
//! Every structure is loaded from environment variables through a
//! `from_env()` constructor:
//!
//! - [`server`]: bind address of the HTTP server
//! - [`database`]: PostgreSQL connection settings
//! - [`jwt`]: token signing configuration
//! - [`password`]: password hashing cost
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`seed`]: first-run default admin account
//!
//! Required values (`DATABASE_URL`, `JWT_SECRET`) have no fallback. A
//! missing or malformed value yields a [`ConfigError`] and the server refuses
//! to start.
//!
//! # Example
//!
//! ```ignore
//! use registrar_config::AppConfig;
//!
//! let config = AppConfig::from_env()?;
//! println!("listening on {}", config.server.bind_address());
//! ```

pub mod cors;
pub mod database;
pub mod error;
pub mod jwt;
pub mod password;
pub mod seed;
pub mod server;

mod env;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use jwt::JwtConfig;
pub use password::PasswordConfig;
pub use seed::SeedConfig;
pub use server::ServerConfig;

/// All configuration needed to run the server.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub password: PasswordConfig,
    pub cors: CorsConfig,
    pub seed: SeedConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            server: ServerConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            jwt: JwtConfig::from_env()?,
            password: PasswordConfig::from_env()?,
            cors: CorsConfig::from_env(),
            seed: SeedConfig::from_env()?,
        })
    }
}
