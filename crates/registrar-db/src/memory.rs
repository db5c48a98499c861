//! In-memory backend.
//!
//! Everything lives behind one async lock, so each operation is atomic with
//! respect to the others. The store can be flipped to unavailable to
//! exercise the degraded paths of the services.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use registrar_models::{
    CreateStudentDto, NewUser, Student, UpdateStudentDto, User, UserCredentials,
};
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::repository::{
    STUDENT_COUNTER, SequenceGenerator, StudentRepository, USER_COUNTER, UserRepository,
};
use crate::student_id::{MAX_GENERATION_ATTEMPTS, generate_student_id, requested_student_id};

#[derive(Debug, Default)]
struct Inner {
    counters: HashMap<String, i64>,
    users: BTreeMap<i64, UserCredentials>,
    students: BTreeMap<i64, Student>,
}

impl Inner {
    fn next_value(&mut self, counter: &str) -> i64 {
        let value = self.counters.entry(counter.to_string()).or_insert(0);
        *value += 1;
        *value
    }

    fn student_email_taken(&self, email: &str, except: Option<i64>) -> bool {
        self.students
            .values()
            .any(|s| s.email == email && Some(s.id) != except)
    }

    fn student_id_taken(&self, student_id: &str, except: Option<i64>) -> bool {
        self.students
            .values()
            .any(|s| s.student_id == student_id && Some(s.id) != except)
    }

    fn fresh_student_id(&self) -> Result<String, StoreError> {
        (0..MAX_GENERATION_ATTEMPTS)
            .map(|_| generate_student_id())
            .find(|candidate| !self.student_id_taken(candidate, None))
            .ok_or(StoreError::Conflict { field: "studentId" })
    }
}

#[derive(Debug)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
    available: AtomicBool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            available: AtomicBool::new(true),
        }
    }

    /// Simulates the store going away (`false`) or coming back (`true`).
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn ensure_available(&self) -> Result<(), StoreError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unavailable(
                "in-memory store marked unavailable".to_string(),
            ))
        }
    }
}

fn newest_first<T, K: Ord>(mut items: Vec<T>, key: impl Fn(&T) -> K) -> Vec<T> {
    items.sort_by_key(|item| std::cmp::Reverse(key(item)));
    items
}

#[async_trait]
impl SequenceGenerator for MemoryStore {
    async fn next_value(&self, counter: &str) -> Result<i64, StoreError> {
        self.ensure_available()?;
        Ok(self.inner.write().await.next_value(counter))
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        self.ensure_available()?;
        let inner = self.inner.read().await;
        let users = inner.users.values().map(|c| c.user.clone()).collect();
        Ok(newest_first(users, |u: &User| (u.created_at, u.id)))
    }

    async fn get_user(&self, id: i64) -> Result<Option<User>, StoreError> {
        self.ensure_available()?;
        let inner = self.inner.read().await;
        Ok(inner.users.get(&id).map(|c| c.user.clone()))
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.get_credentials(email).await?.map(|c| c.user))
    }

    async fn get_credentials(&self, email: &str) -> Result<Option<UserCredentials>, StoreError> {
        self.ensure_available()?;
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .values()
            .find(|c| c.user.email == email)
            .cloned())
    }

    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        self.ensure_available()?;
        let mut inner = self.inner.write().await;
        if inner.users.values().any(|c| c.user.email == user.email) {
            return Err(StoreError::Conflict { field: "email" });
        }

        let id = inner.next_value(USER_COUNTER);
        let created = User {
            id,
            email: user.email,
            name: user.name,
            role: user.role,
            created_at: Utc::now(),
        };
        inner.users.insert(
            id,
            UserCredentials {
                user: created.clone(),
                password_hash: user.password_hash,
            },
        );
        Ok(created)
    }
}

#[async_trait]
impl StudentRepository for MemoryStore {
    async fn list_students(&self) -> Result<Vec<Student>, StoreError> {
        self.ensure_available()?;
        let inner = self.inner.read().await;
        let students = inner.students.values().cloned().collect();
        Ok(newest_first(students, |s: &Student| (s.created_at, s.id)))
    }

    async fn get_student(&self, id: i64) -> Result<Option<Student>, StoreError> {
        self.ensure_available()?;
        Ok(self.inner.read().await.students.get(&id).cloned())
    }

    async fn get_student_by_email(&self, email: &str) -> Result<Option<Student>, StoreError> {
        self.ensure_available()?;
        let inner = self.inner.read().await;
        Ok(inner.students.values().find(|s| s.email == email).cloned())
    }

    async fn create_student(&self, student: CreateStudentDto) -> Result<Student, StoreError> {
        self.ensure_available()?;
        let mut inner = self.inner.write().await;

        if inner.student_email_taken(&student.email, None) {
            return Err(StoreError::Conflict { field: "email" });
        }
        let student_id = match requested_student_id(student.student_id.as_deref()) {
            Some(requested) if inner.student_id_taken(requested, None) => {
                return Err(StoreError::Conflict { field: "studentId" });
            }
            Some(requested) => requested.to_string(),
            None => inner.fresh_student_id()?,
        };

        let id = inner.next_value(STUDENT_COUNTER);
        let now = Utc::now();
        let created = Student {
            id,
            first_name: student.first_name,
            last_name: student.last_name,
            email: student.email,
            course: student.course,
            status: student.status.unwrap_or_default(),
            student_id,
            enrollment_date: student.enrollment_date,
            phone: student.phone,
            address: student.address,
            notes: student.notes,
            created_at: now,
            updated_at: now,
        };
        inner.students.insert(id, created.clone());
        Ok(created)
    }

    async fn update_student(
        &self,
        id: i64,
        update: UpdateStudentDto,
    ) -> Result<Option<Student>, StoreError> {
        self.ensure_available()?;
        let mut inner = self.inner.write().await;

        let Some(mut student) = inner.students.get(&id).cloned() else {
            return Ok(None);
        };

        update.apply_to(&mut student);
        if student.student_id.trim().is_empty() {
            student.student_id = inner.fresh_student_id()?;
        }
        if inner.student_email_taken(&student.email, Some(id)) {
            return Err(StoreError::Conflict { field: "email" });
        }
        if inner.student_id_taken(&student.student_id, Some(id)) {
            return Err(StoreError::Conflict { field: "studentId" });
        }

        student.updated_at = Utc::now();
        inner.students.insert(id, student.clone());
        Ok(Some(student))
    }

    async fn delete_student(&self, id: i64) -> Result<bool, StoreError> {
        self.ensure_available()?;
        Ok(self.inner.write().await.students.remove(&id).is_some())
    }

    async fn delete_all_students(&self) -> Result<u64, StoreError> {
        self.ensure_available()?;
        let mut inner = self.inner.write().await;
        let removed = inner.students.len() as u64;
        inner.students.clear();
        Ok(removed)
    }
}
