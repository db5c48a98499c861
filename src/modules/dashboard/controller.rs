use axum::{Json, extract::State};
use registrar_core::{AppError, ErrorResponse};
use registrar_models::DashboardStats;
use tracing::instrument;

use super::service::DashboardService;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/dashboard/stats",
    responses(
        (status = 200, description = "Aggregate student statistics", body = DashboardStats),
        (status = 401, description = "Access token required", body = ErrorResponse),
        (status = 403, description = "Invalid or expired token", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Dashboard"
)]
#[instrument(skip(state))]
pub async fn get_stats(State(state): State<AppState>) -> Result<Json<DashboardStats>, AppError> {
    let stats = DashboardService::stats(state.students.as_ref()).await?;
    Ok(Json(stats))
}
