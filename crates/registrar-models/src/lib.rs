//! # Registrar Models
//!
//! Domain models and DTOs for the Registrar API.
//!
//! This crate holds every data structure that crosses the wire or the
//! repository boundary, together with its validation rules.
//!
//! # Modules
//!
//! - [`auth`]: login request and responses
//! - [`dashboard`]: aggregated statistics over the student set
//! - [`students`]: student entity, status, create/update DTOs and filters
//! - [`users`]: user entity and the credential record used by login
//!
//! JSON keys are camelCase on the wire (`firstName`, `studentId`,
//! `totalStudents`, ...).

pub mod auth;
pub mod dashboard;
pub mod students;
pub mod users;

// Re-export commonly used types at crate root for convenience
pub use auth::{LoginRequest, LoginResponse, MessageResponse, VerifyResponse};
pub use dashboard::DashboardStats;
pub use students::{
    CreateStudentDto, Student, StudentFilter, StudentResponse, StudentStatus, UpdateStudentDto,
    distinct_courses,
};
pub use users::{CreateUserDto, NewUser, User, UserCredentials};
