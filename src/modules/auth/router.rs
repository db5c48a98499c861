use axum::{Router, middleware, routing::post};

use super::controller::{login_user, verify_user};
use crate::middleware::auth::require_auth;
use crate::state::AppState;

/// `/login` is public; everything registered before the route layer
/// requires a bearer token.
pub fn init_auth_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/verify", post(verify_user))
        .route_layer(middleware::from_fn_with_state(state, require_auth))
        .route("/login", post(login_user))
}
