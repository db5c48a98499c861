//! Signed-in session over [`ApiClient`].
//!
//! Reads are served from [`DataCache`] when possible. Every successful
//! mutation, login and logout invalidates it. A 401 or 403 from the server
//! clears both caches, since the stored token can no longer be used.
//!
//! Submissions (login, create, update, delete) are serialized by an
//! in-flight flag: while one is running, another fails fast with
//! [`ClientError::Busy`] instead of queueing.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use registrar_models::{
    CreateStudentDto, DashboardStats, LoginRequest, Student, StudentFilter, UpdateStudentDto, User,
};

use crate::api::ApiClient;
use crate::auth_cache::{AuthCache, StoredAuth};
use crate::data_cache::DataCache;
use crate::error::ClientError;

pub struct Session {
    api: ApiClient,
    auth: Mutex<AuthCache>,
    data: Mutex<DataCache>,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag when dropped.
pub(crate) struct Submission<'a> {
    flag: &'a AtomicBool,
}

impl Drop for Submission<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl Session {
    pub fn new(api: ApiClient, auth: AuthCache) -> Self {
        Self {
            api,
            auth: Mutex::new(auth),
            data: Mutex::new(DataCache::default()),
            in_flight: AtomicBool::new(false),
        }
    }

    fn auth(&self) -> MutexGuard<'_, AuthCache> {
        self.auth.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn data(&self) -> MutexGuard<'_, DataCache> {
        self.data.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn begin_submission(&self) -> Result<Submission<'_>, ClientError> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| ClientError::Busy)?;
        Ok(Submission {
            flag: &self.in_flight,
        })
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth().get().is_some()
    }

    /// The user stored at the last login, without asking the server.
    pub fn current_user(&self) -> Option<User> {
        self.auth().get().map(|auth| auth.user.clone())
    }

    fn token(&self) -> Result<String, ClientError> {
        self.auth()
            .token()
            .map(str::to_string)
            .ok_or(ClientError::NotAuthenticated)
    }

    /// Drops the stored session when the server rejected the token.
    ///
    /// The server's error is always returned. Failing to delete the auth
    /// file is only logged; the in-memory session is gone either way.
    fn check<T>(&self, result: Result<T, ClientError>) -> Result<T, ClientError> {
        if result.as_ref().is_err_and(ClientError::is_auth_failure) {
            if let Err(err) = self.auth().clear() {
                tracing::warn!(error = %err, "failed to remove stored session");
            }
            self.data().invalidate();
        }
        result
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<User, ClientError> {
        let _submission = self.begin_submission()?;

        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self.api.login(&request).await?;

        self.auth().store(StoredAuth {
            token: response.token,
            user: response.user.clone(),
        })?;
        self.data().invalidate();
        Ok(response.user)
    }

    pub fn logout(&self) -> Result<(), ClientError> {
        self.auth().clear()?;
        self.data().invalidate();
        Ok(())
    }

    /// Confirms the stored token with the server.
    pub async fn verify(&self) -> Result<User, ClientError> {
        let token = self.token()?;
        let response = self.check(self.api.verify(&token).await)?;
        Ok(response.user)
    }

    /// Student list, from the cache unless empty or `refresh` is set.
    pub async fn students(&self, refresh: bool) -> Result<Vec<Student>, ClientError> {
        if !refresh {
            let cached = self.data().students().map(<[Student]>::to_vec);
            if let Some(students) = cached {
                return Ok(students);
            }
        }

        let token = self.token()?;
        let students = self.check(self.api.list_students(&token).await)?;
        self.data().set_students(students.clone());
        Ok(students)
    }

    pub async fn filtered_students(
        &self,
        filter: &StudentFilter,
    ) -> Result<Vec<Student>, ClientError> {
        self.students(false).await?;
        Ok(self.data().filtered(filter))
    }

    /// Distinct courses of the cached list.
    pub async fn courses(&self) -> Result<Vec<String>, ClientError> {
        self.students(false).await?;
        Ok(self.data().courses())
    }

    pub async fn student(&self, id: i64) -> Result<Student, ClientError> {
        let token = self.token()?;
        self.check(self.api.get_student(&token, id).await)
    }

    pub async fn stats(&self, refresh: bool) -> Result<DashboardStats, ClientError> {
        if !refresh {
            let cached = self.data().stats().cloned();
            if let Some(stats) = cached {
                return Ok(stats);
            }
        }

        let token = self.token()?;
        let stats = self.check(self.api.dashboard_stats(&token).await)?;
        self.data().set_stats(stats.clone());
        Ok(stats)
    }

    pub async fn create_student(&self, student: &CreateStudentDto) -> Result<Student, ClientError> {
        let _submission = self.begin_submission()?;
        let token = self.token()?;

        let response = self.check(self.api.create_student(&token, student).await)?;
        self.data().invalidate();
        Ok(response.student)
    }

    pub async fn update_student(
        &self,
        id: i64,
        update: &UpdateStudentDto,
    ) -> Result<Student, ClientError> {
        let _submission = self.begin_submission()?;
        let token = self.token()?;

        let response = self.check(self.api.update_student(&token, id, update).await)?;
        self.data().invalidate();
        Ok(response.student)
    }

    pub async fn delete_student(&self, id: i64) -> Result<String, ClientError> {
        let _submission = self.begin_submission()?;
        let token = self.token()?;

        let response = self.check(self.api.delete_student(&token, id).await)?;
        self.data().invalidate();
        Ok(response.message)
    }
}
