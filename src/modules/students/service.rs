use registrar_core::AppError;
use registrar_db::{StoreError, StudentRepository};
use registrar_models::{CreateStudentDto, Student, UpdateStudentDto};
use tracing::{info, instrument};

use crate::metrics::{track_student_created, track_student_deleted};
use crate::modules::with_fallback;

const EMAIL_TAKEN: &str = "Student with this email already exists";
const STUDENT_ID_TAKEN: &str = "Student with this student ID already exists";

fn not_found() -> AppError {
    AppError::not_found(anyhow::anyhow!("Student not found"))
}

fn conflict(message: &'static str) -> AppError {
    AppError::conflict(anyhow::anyhow!(message))
}

/// Turns repository conflicts into the student-specific messages.
fn map_store_error(err: StoreError) -> AppError {
    match err {
        StoreError::Conflict { field: "studentId" } => conflict(STUDENT_ID_TAKEN),
        StoreError::Conflict { field: "email" } => conflict(EMAIL_TAKEN),
        other => other.into(),
    }
}

pub struct StudentService;

impl StudentService {
    #[instrument(skip(students))]
    pub async fn list_students(students: &dyn StudentRepository) -> Result<Vec<Student>, AppError> {
        with_fallback("list_students", students.list_students().await, Vec::new())
    }

    #[instrument(skip(students))]
    pub async fn get_student(students: &dyn StudentRepository, id: i64) -> Result<Student, AppError> {
        with_fallback("get_student", students.get_student(id).await, None)?.ok_or_else(not_found)
    }

    #[instrument(skip(students, dto), fields(email = %dto.email))]
    pub async fn create_student(
        students: &dyn StudentRepository,
        dto: CreateStudentDto,
    ) -> Result<Student, AppError> {
        let existing = with_fallback(
            "get_student_by_email",
            students.get_student_by_email(&dto.email).await,
            None,
        )?;
        if existing.is_some() {
            return Err(conflict(EMAIL_TAKEN));
        }

        let student = students
            .create_student(dto)
            .await
            .map_err(map_store_error)?;

        track_student_created();
        info!(id = student.id, student_id = %student.student_id, "Student created");
        Ok(student)
    }

    /// Rejects an email owned by another student before touching storage;
    /// a missing target is a 404.
    #[instrument(skip(students, dto))]
    pub async fn update_student(
        students: &dyn StudentRepository,
        id: i64,
        dto: UpdateStudentDto,
    ) -> Result<Student, AppError> {
        if let Some(email) = &dto.email {
            let owner = with_fallback(
                "get_student_by_email",
                students.get_student_by_email(email).await,
                None,
            )?;
            if owner.is_some_and(|owner| owner.id != id) {
                return Err(conflict(EMAIL_TAKEN));
            }
        }

        let updated = match students.update_student(id, dto).await {
            Err(err @ StoreError::Conflict { .. }) => return Err(map_store_error(err)),
            result => with_fallback("update_student", result, None)?,
        };

        updated.ok_or_else(not_found)
    }

    #[instrument(skip(students))]
    pub async fn delete_student(students: &dyn StudentRepository, id: i64) -> Result<(), AppError> {
        let deleted = with_fallback("delete_student", students.delete_student(id).await, false)?;
        if !deleted {
            return Err(not_found());
        }

        track_student_deleted();
        info!(id, "Student deleted");
        Ok(())
    }
}
