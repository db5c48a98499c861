//! PostgreSQL backend.
//!
//! Queries are built at runtime with `sqlx::query_as`, so the crate builds
//! without a live database.

mod sequence;
mod students;
mod users;

use sqlx::PgPool;

/// Repository implementation over a PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}
