use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use registrar_models::{CreateStudentDto, Student, StudentStatus, UpdateStudentDto};
use sqlx::{Executor, Postgres};

use super::PgStore;
use super::sequence::next_value;
use crate::error::StoreError;
use crate::repository::{STUDENT_COUNTER, StudentRepository};
use crate::student_id::{MAX_GENERATION_ATTEMPTS, generate_student_id, requested_student_id};

#[derive(Debug, sqlx::FromRow)]
struct StudentRow {
    id: i64,
    first_name: String,
    last_name: String,
    email: String,
    course: String,
    status: String,
    student_id: String,
    enrollment_date: NaiveDate,
    phone: Option<String>,
    address: Option<String>,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<StudentRow> for Student {
    type Error = StoreError;

    fn try_from(row: StudentRow) -> Result<Self, Self::Error> {
        let status = row.status.parse::<StudentStatus>().map_err(StoreError::Query)?;
        Ok(Student {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            course: row.course,
            status,
            student_id: row.student_id,
            enrollment_date: row.enrollment_date,
            phone: row.phone,
            address: row.address,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const STUDENT_COLUMNS: &str = "id, first_name, last_name, email, course, status, student_id, \
    enrollment_date, phone, address, notes, created_at, updated_at";

async fn student_id_exists<'e, E>(executor: E, student_id: &str) -> Result<bool, StoreError>
where
    E: Executor<'e, Database = Postgres>,
{
    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM students WHERE student_id = $1)")
            .bind(student_id)
            .fetch_one(executor)
            .await?;
    Ok(exists)
}

impl PgStore {
    async fn insert_student(
        &self,
        id: i64,
        student_id: &str,
        student: &CreateStudentDto,
    ) -> Result<Student, StoreError> {
        let row = sqlx::query_as::<_, StudentRow>(&format!(
            "INSERT INTO students (id, first_name, last_name, email, course, status, student_id,
                                   enrollment_date, phone, address, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {STUDENT_COLUMNS}"
        ))
        .bind(id)
        .bind(&student.first_name)
        .bind(&student.last_name)
        .bind(&student.email)
        .bind(&student.course)
        .bind(student.status.unwrap_or_default().as_str())
        .bind(student_id)
        .bind(student.enrollment_date)
        .bind(&student.phone)
        .bind(&student.address)
        .bind(&student.notes)
        .fetch_one(&self.pool)
        .await?;
        row.try_into()
    }
}

#[async_trait]
impl StudentRepository for PgStore {
    async fn list_students(&self) -> Result<Vec<Student>, StoreError> {
        let rows = sqlx::query_as::<_, StudentRow>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Student::try_from).collect()
    }

    async fn get_student(&self, id: i64) -> Result<Option<Student>, StoreError> {
        let row = sqlx::query_as::<_, StudentRow>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Student::try_from).transpose()
    }

    async fn get_student_by_email(&self, email: &str) -> Result<Option<Student>, StoreError> {
        let row = sqlx::query_as::<_, StudentRow>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Student::try_from).transpose()
    }

    async fn create_student(&self, student: CreateStudentDto) -> Result<Student, StoreError> {
        let id = next_value(&self.pool, STUDENT_COUNTER).await?;

        if let Some(requested) = requested_student_id(student.student_id.as_deref()) {
            return self.insert_student(id, requested, &student).await;
        }

        let mut attempts = 0;
        loop {
            attempts += 1;
            let generated = generate_student_id();
            match self.insert_student(id, &generated, &student).await {
                Err(StoreError::Conflict { field: "studentId" })
                    if attempts < MAX_GENERATION_ATTEMPTS =>
                {
                    tracing::debug!(student_id = %generated, "generated student id taken, retrying");
                }
                result => return result,
            }
        }
    }

    async fn update_student(
        &self,
        id: i64,
        update: UpdateStudentDto,
    ) -> Result<Option<Student>, StoreError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, StudentRow>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
        let Some(row) = row else {
            return Ok(None);
        };

        let mut student = Student::try_from(row)?;
        update.apply_to(&mut student);

        if student.student_id.trim().is_empty() {
            let mut fresh = None;
            for _ in 0..MAX_GENERATION_ATTEMPTS {
                let candidate = generate_student_id();
                if !student_id_exists(&mut *tx, &candidate).await? {
                    fresh = Some(candidate);
                    break;
                }
            }
            student.student_id = fresh.ok_or(StoreError::Conflict { field: "studentId" })?;
        }

        let row = sqlx::query_as::<_, StudentRow>(&format!(
            "UPDATE students
             SET first_name = $2, last_name = $3, email = $4, course = $5, status = $6,
                 student_id = $7, enrollment_date = $8, phone = $9, address = $10, notes = $11,
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {STUDENT_COLUMNS}"
        ))
        .bind(id)
        .bind(&student.first_name)
        .bind(&student.last_name)
        .bind(&student.email)
        .bind(&student.course)
        .bind(student.status.as_str())
        .bind(&student.student_id)
        .bind(student.enrollment_date)
        .bind(&student.phone)
        .bind(&student.address)
        .bind(&student.notes)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;

        row.try_into().map(Some)
    }

    async fn delete_student(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_all_students(&self) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM students")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
