use std::sync::Arc;

use registrar_config::{AppConfig, CorsConfig, JwtConfig, PasswordConfig};
use registrar_db::{StudentRepository, UserRepository};

/// Shared handles passed to every handler.
///
/// Storage is injected here at startup; handlers never reach for a global.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub students: Arc<dyn StudentRepository>,
    pub jwt_config: JwtConfig,
    pub password_config: PasswordConfig,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new<S>(
        store: Arc<S>,
        jwt_config: JwtConfig,
        password_config: PasswordConfig,
        cors_config: CorsConfig,
    ) -> Self
    where
        S: UserRepository + StudentRepository + 'static,
    {
        Self {
            users: store.clone(),
            students: store,
            jwt_config,
            password_config,
            cors_config,
        }
    }

    pub fn from_config<S>(store: Arc<S>, config: &AppConfig) -> Self
    where
        S: UserRepository + StudentRepository + 'static,
    {
        Self::new(
            store,
            config.jwt.clone(),
            config.password.clone(),
            config.cors.clone(),
        )
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("jwt_config", &self.jwt_config)
            .field("password_config", &self.password_config)
            .field("cors_config", &self.cors_config)
            .finish_non_exhaustive()
    }
}
