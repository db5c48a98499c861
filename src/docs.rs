use registrar_core::{ErrorResponse, FieldError};
use registrar_models::{
    CreateStudentDto, DashboardStats, LoginRequest, LoginResponse, MessageResponse, Student,
    StudentResponse, StudentStatus, UpdateStudentDto, User, VerifyResponse,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::verify_user,
        crate::modules::students::controller::get_students,
        crate::modules::students::controller::get_student,
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::update_student,
        crate::modules::students::controller::delete_student,
        crate::modules::dashboard::controller::get_stats,
    ),
    components(
        schemas(
            User,
            LoginRequest,
            LoginResponse,
            VerifyResponse,
            MessageResponse,
            Student,
            StudentStatus,
            CreateStudentDto,
            UpdateStudentDto,
            StudentResponse,
            DashboardStats,
            ErrorResponse,
            FieldError,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login and token verification"),
        (name = "Students", description = "Student records"),
        (name = "Dashboard", description = "Aggregate statistics")
    ),
    info(
        title = "Registrar API",
        version = "0.1.0",
        description = "Student management REST API built with Rust, Axum, and PostgreSQL.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
