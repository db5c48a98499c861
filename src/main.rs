use std::sync::Arc;

use dotenvy::dotenv;
use registrar::logging::{DEFAULT_LOG_DIR, init_tracing, shutdown_tracer};
use registrar::metrics::{init_metrics, metrics_app};
use registrar::router::init_router;
use registrar::startup::{DATABASE_RETRY_INTERVAL, prepare_database, retry_until_ready};
use registrar::state::AppState;
use registrar_config::AppConfig;
use registrar_db::{PgStore, init_db_pool};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let log_dir = std::env::var("LOG_DIR").unwrap_or_else(|_| DEFAULT_LOG_DIR.to_string());
    init_tracing(&log_dir);

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return Err(e.into());
        }
    };

    let pool = init_db_pool(&config.database)?;
    info!(database = %config.database.redacted_url(), "Database pool created");

    let store = Arc::new(PgStore::new(pool.clone()));
    let state = AppState::from_config(store, &config);

    if let Err(e) =
        prepare_database(&pool, state.users.as_ref(), &config.seed, &config.password).await
    {
        warn!(error = %e, "Database not ready, continuing in degraded mode");
        let users = state.users.clone();
        let seed = config.seed.clone();
        let password = config.password.clone();
        tokio::spawn(async move {
            retry_until_ready("database", DATABASE_RETRY_INTERVAL, || {
                let pool = pool.clone();
                let users = users.clone();
                let seed = seed.clone();
                let password = password.clone();
                async move { prepare_database(&pool, users.as_ref(), &seed, &password).await }
            })
            .await;
        });
    }

    if let Some(handle) = init_metrics() {
        let metrics_address = format!("{}:{}", config.server.host, config.server.metrics_port);
        let listener = tokio::net::TcpListener::bind(&metrics_address).await?;
        info!("Metrics available at http://{}/metrics", metrics_address);
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, metrics_app(handle)).await {
                error!(error = %e, "Metrics server stopped");
            }
        });
    }

    let app = init_router(state);
    let address = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("Server running on http://{}", address);
    info!("Scalar UI available at http://{}/scalar", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    shutdown_tracer();
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}
