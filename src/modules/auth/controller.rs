use axum::{Json, extract::State};
use registrar_core::{AppError, ErrorResponse};
use registrar_models::{LoginRequest, LoginResponse, VerifyResponse};
use tracing::instrument;

use super::service::AuthService;
use crate::middleware::auth::AuthUser;
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Login and receive a bearer token
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Invalid email or password", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let response = AuthService::authenticate(state.users.as_ref(), dto, &state.jwt_config).await?;
    Ok(Json(response))
}

/// Return the account behind the presented token
#[utoipa::path(
    post,
    path = "/api/auth/verify",
    responses(
        (status = 200, description = "Token is valid", body = VerifyResponse),
        (status = 401, description = "Access token required", body = ErrorResponse),
        (status = 403, description = "Invalid or expired token", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id()))]
pub async fn verify_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<VerifyResponse>, AppError> {
    let user = UserService::get_user(state.users.as_ref(), auth_user.user_id()).await?;
    Ok(Json(VerifyResponse { user }))
}
