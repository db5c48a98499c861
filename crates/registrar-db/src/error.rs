use registrar_core::AppError;
use thiserror::Error;

/// Errors raised by repository backends.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store cannot be reached.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    /// A uniqueness constraint was violated. `field` is the wire name, or
    /// `"record"` when the constraint does not name a known column.
    #[error("uniqueness conflict on {field}")]
    Conflict { field: &'static str },
    /// Any other failure while executing a query.
    #[error("storage query failed: {0}")]
    Query(String),
}

impl StoreError {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => StoreError::Unavailable(err.to_string()),
            sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::Conflict {
                field: conflict_field(db.constraint()),
            },
            _ => StoreError::Query(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        match err {
            sqlx::migrate::MigrateError::Execute(inner) => inner.into(),
            other => StoreError::Query(other.to_string()),
        }
    }
}

fn conflict_field(constraint: Option<&str>) -> &'static str {
    match constraint {
        Some(name) if name.contains("student_id") => "studentId",
        Some(name) if name.contains("email") => "email",
        _ => "record",
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(_) => AppError::unavailable(err),
            StoreError::Conflict { field } => {
                let message = match field {
                    "studentId" => "A student with this student ID already exists",
                    "email" => "A record with this email already exists",
                    _ => "A record with these values already exists",
                };
                AppError::conflict(StoreConflict(message))
            }
            StoreError::Query(_) => AppError::internal(err),
        }
    }
}

/// Client-facing text for a conflict.
#[derive(Debug, Error)]
#[error("{0}")]
struct StoreConflict(&'static str);
