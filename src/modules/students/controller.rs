use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use registrar_core::{AppError, ErrorResponse};
use registrar_models::{
    CreateStudentDto, MessageResponse, Student, StudentResponse, UpdateStudentDto,
};
use tracing::instrument;

use super::service::StudentService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Path ids must be plain integers.
fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.parse()
        .map_err(|_| AppError::bad_request(anyhow::anyhow!("Invalid student ID")))
}

#[utoipa::path(
    get,
    path = "/api/students",
    responses(
        (status = 200, description = "All students, newest first", body = Vec<Student>),
        (status = 401, description = "Access token required", body = ErrorResponse),
        (status = 403, description = "Invalid or expired token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn get_students(State(state): State<AppState>) -> Result<Json<Vec<Student>>, AppError> {
    let students = StudentService::list_students(state.students.as_ref()).await?;
    Ok(Json(students))
}

#[utoipa::path(
    get,
    path = "/api/students/{id}",
    params(
        ("id" = i64, Path, description = "Student numeric ID")
    ),
    responses(
        (status = 200, description = "Student details", body = Student),
        (status = 400, description = "Invalid student ID", body = ErrorResponse),
        (status = 401, description = "Access token required", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Student>, AppError> {
    let id = parse_id(&id)?;
    let student = StudentService::get_student(state.students.as_ref(), id).await?;
    Ok(Json(student))
}

#[utoipa::path(
    post,
    path = "/api/students",
    request_body = CreateStudentDto,
    responses(
        (status = 201, description = "Student created successfully", body = StudentResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Access token required", body = ErrorResponse),
        (status = 409, description = "Email or student ID already exists", body = ErrorResponse),
        (status = 503, description = "Storage unavailable", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Students"
)]
#[instrument(skip(state, dto))]
pub async fn create_student(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateStudentDto>,
) -> Result<(StatusCode, Json<StudentResponse>), AppError> {
    let student = StudentService::create_student(state.students.as_ref(), dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(StudentResponse {
            message: "Student created successfully".to_string(),
            student,
        }),
    ))
}

#[utoipa::path(
    put,
    path = "/api/students/{id}",
    params(
        ("id" = i64, Path, description = "Student numeric ID")
    ),
    request_body = UpdateStudentDto,
    responses(
        (status = 200, description = "Student updated successfully", body = StudentResponse),
        (status = 400, description = "Validation error or invalid ID", body = ErrorResponse),
        (status = 401, description = "Access token required", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 409, description = "Email belongs to another student", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Students"
)]
#[instrument(skip(state, dto))]
pub async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(dto): ValidatedJson<UpdateStudentDto>,
) -> Result<Json<StudentResponse>, AppError> {
    let id = parse_id(&id)?;
    let student = StudentService::update_student(state.students.as_ref(), id, dto).await?;
    Ok(Json(StudentResponse {
        message: "Student updated successfully".to_string(),
        student,
    }))
}

#[utoipa::path(
    delete,
    path = "/api/students/{id}",
    params(
        ("id" = i64, Path, description = "Student numeric ID")
    ),
    responses(
        (status = 200, description = "Student deleted successfully", body = MessageResponse),
        (status = 400, description = "Invalid student ID", body = ErrorResponse),
        (status = 401, description = "Access token required", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_id(&id)?;
    StudentService::delete_student(state.students.as_ref(), id).await?;
    Ok(Json(MessageResponse::new("Student deleted successfully")))
}
