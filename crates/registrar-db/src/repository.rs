//! Repository ports.
//!
//! The HTTP layer only sees these traits; any backend implementing them is
//! interchangeable. Id assignment, student id generation and password hash
//! stripping all happen behind this boundary.

use async_trait::async_trait;
use registrar_models::{
    CreateStudentDto, NewUser, Student, UpdateStudentDto, User, UserCredentials,
};

use crate::error::StoreError;

pub const USER_COUNTER: &str = "userId";
pub const STUDENT_COUNTER: &str = "studentId";

/// Atomic per-name counter used to mint numeric ids.
#[async_trait]
pub trait SequenceGenerator: Send + Sync {
    /// Increments and returns the counter. The first call for a name returns 1.
    async fn next_value(&self, counter: &str) -> Result<i64, StoreError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All users, newest first.
    async fn list_users(&self) -> Result<Vec<User>, StoreError>;

    async fn get_user(&self, id: i64) -> Result<Option<User>, StoreError>;

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// The only read that returns the password hash.
    async fn get_credentials(&self, email: &str) -> Result<Option<UserCredentials>, StoreError>;

    async fn create_user(&self, user: NewUser) -> Result<User, StoreError>;
}

#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// All students, newest first.
    async fn list_students(&self) -> Result<Vec<Student>, StoreError>;

    async fn get_student(&self, id: i64) -> Result<Option<Student>, StoreError>;

    async fn get_student_by_email(&self, email: &str) -> Result<Option<Student>, StoreError>;

    /// Assigns the numeric id, fills a generated student id when none was
    /// given and stamps both timestamps.
    async fn create_student(&self, student: CreateStudentDto) -> Result<Student, StoreError>;

    /// Applies the present fields and refreshes `updated_at`.
    ///
    /// Returns `None` when no student has this id.
    async fn update_student(
        &self,
        id: i64,
        update: UpdateStudentDto,
    ) -> Result<Option<Student>, StoreError>;

    /// Returns `false` when no student has this id.
    async fn delete_student(&self, id: i64) -> Result<bool, StoreError>;

    /// Removes every student and returns how many were deleted.
    async fn delete_all_students(&self) -> Result<u64, StoreError>;
}
