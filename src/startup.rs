//! Database preparation at boot.
//!
//! The pool is lazy, so the server comes up even when PostgreSQL does not.
//! Migrations and the default admin seed are then retried in the background
//! until they succeed.

use std::future::Future;
use std::time::Duration;

use registrar_config::{PasswordConfig, SeedConfig};
use registrar_db::{PgPool, UserRepository, run_migrations};
use registrar_models::User;
use tracing::{info, warn};

use crate::modules::users::service::UserService;

pub const DATABASE_RETRY_INTERVAL: Duration = Duration::from_secs(15);

/// Applies migrations, then seeds the default admin.
pub async fn prepare_database(
    pool: &PgPool,
    users: &dyn UserRepository,
    seed: &SeedConfig,
    password_config: &PasswordConfig,
) -> anyhow::Result<Option<User>> {
    run_migrations(pool).await?;
    info!("Migrations applied");
    seed_default_admin(users, seed, password_config).await
}

pub async fn seed_default_admin(
    users: &dyn UserRepository,
    seed: &SeedConfig,
    password_config: &PasswordConfig,
) -> anyhow::Result<Option<User>> {
    UserService::ensure_default_admin(users, seed, password_config)
        .await
        .map_err(|e| e.error)
}

/// Calls `attempt` until it succeeds, sleeping `retry_every` between tries.
pub async fn retry_until_ready<F, Fut, T>(what: &'static str, retry_every: Duration, mut attempt: F) -> T
where
    F: FnMut() -> Fut,
    Fut: Future<Output = anyhow::Result<T>>,
{
    let mut failures: u32 = 0;
    loop {
        match attempt().await {
            Ok(value) => {
                if failures > 0 {
                    info!(what, failures, "Ready after retrying");
                }
                return value;
            }
            Err(e) => {
                failures += 1;
                warn!(
                    what,
                    error = %e,
                    retry_in_ms = retry_every.as_millis() as u64,
                    "Not ready, retrying"
                );
                tokio::time::sleep(retry_every).await;
            }
        }
    }
}
