//! # Registrar DB
//!
//! Persistence for the Registrar API.
//!
//! The rest of the workspace talks to storage only through the traits in
//! [`repository`]. Two backends implement them:
//!
//! - [`PgStore`]: PostgreSQL through `sqlx`, with embedded migrations
//! - [`MemoryStore`]: an in-process store used by tests and demos
//!
//! # Example
//!
//! ```ignore
//! use registrar_db::{PgStore, init_db_pool, run_migrations};
//!
//! let pool = init_db_pool(&config.database)?;
//! run_migrations(&pool).await?;
//! let store = PgStore::new(pool);
//! ```

pub mod error;
pub mod memory;
pub mod postgres;
pub mod repository;
pub mod student_id;

use registrar_config::DatabaseConfig;
use sqlx::postgres::PgPoolOptions;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use repository::{SequenceGenerator, StudentRepository, UserRepository};
pub use sqlx::PgPool;

/// Builds a PostgreSQL pool without connecting.
///
/// Connections are opened on first use, so the server can start while the
/// database is down; requests then fail with [`StoreError::Unavailable`]
/// once `acquire_timeout` elapses.
pub fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, StoreError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect_lazy(&config.url)?;
    Ok(pool)
}

/// Runs the embedded migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
