//! Typed HTTP calls against the Registrar API.

use std::sync::Arc;

use registrar_models::{
    CreateStudentDto, DashboardStats, LoginRequest, LoginResponse, MessageResponse, Student,
    StudentResponse, UpdateStudentDto, VerifyResponse,
};
use reqwest::{RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::{ClientError, FieldDetail};

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(default)]
    errors: Vec<FieldDetail>,
}

/// HTTP client for the Registrar API.
///
/// Stateless apart from the base URL; protected calls take the bearer token
/// explicitly so the caller decides where it is stored.
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: Arc<str>,
}

impl ApiClient {
    /// `base_url` is the server root, e.g. `http://localhost:3000`.
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: Arc::from(base_url.trim_end_matches('/')),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ClientError> {
        let builder = self.client.post(self.url("/auth/login")).json(request);
        send(builder).await
    }

    pub async fn verify(&self, token: &str) -> Result<VerifyResponse, ClientError> {
        let builder = self.client.post(self.url("/auth/verify")).bearer_auth(token);
        send(builder).await
    }

    pub async fn list_students(&self, token: &str) -> Result<Vec<Student>, ClientError> {
        let builder = self.client.get(self.url("/students")).bearer_auth(token);
        send(builder).await
    }

    pub async fn get_student(&self, token: &str, id: i64) -> Result<Student, ClientError> {
        let builder = self
            .client
            .get(self.url(&format!("/students/{id}")))
            .bearer_auth(token);
        send(builder).await
    }

    pub async fn create_student(
        &self,
        token: &str,
        student: &CreateStudentDto,
    ) -> Result<StudentResponse, ClientError> {
        let builder = self
            .client
            .post(self.url("/students"))
            .bearer_auth(token)
            .json(student);
        send(builder).await
    }

    pub async fn update_student(
        &self,
        token: &str,
        id: i64,
        update: &UpdateStudentDto,
    ) -> Result<StudentResponse, ClientError> {
        let builder = self
            .client
            .put(self.url(&format!("/students/{id}")))
            .bearer_auth(token)
            .json(update);
        send(builder).await
    }

    pub async fn delete_student(
        &self,
        token: &str,
        id: i64,
    ) -> Result<MessageResponse, ClientError> {
        let builder = self
            .client
            .delete(self.url(&format!("/students/{id}")))
            .bearer_auth(token);
        send(builder).await
    }

    pub async fn dashboard_stats(&self, token: &str) -> Result<DashboardStats, ClientError> {
        let builder = self
            .client
            .get(self.url("/dashboard/stats"))
            .bearer_auth(token);
        send(builder).await
    }
}

async fn send<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, ClientError> {
    let response = builder.send().await?;
    if !response.status().is_success() {
        return Err(api_error(response).await);
    }
    Ok(response.json().await?)
}

async fn api_error(response: Response) -> ClientError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();

    match serde_json::from_str::<ErrorBody>(&text) {
        Ok(body) => ClientError::Api {
            status,
            message: body.message,
            errors: body.errors,
        },
        Err(_) => ClientError::Api {
            status,
            message: status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string(),
            errors: Vec::new(),
        },
    }
}
