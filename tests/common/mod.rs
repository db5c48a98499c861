use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use registrar::router::init_router;
use registrar::state::AppState;
use registrar::modules::users::service::UserService;
use registrar_config::{CorsConfig, JwtConfig, PasswordConfig, SeedConfig};
use registrar_db::MemoryStore;
use serde_json::{Value, json};
use tower::ServiceExt;

pub const ADMIN_EMAIL: &str = "admin@university.edu";
pub const ADMIN_PASSWORD: &str = "admin123";

#[allow(dead_code)]
pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test_secret_key_for_testing_purposes".to_string(),
        token_expiry: 3600,
    }
}

pub struct TestApp {
    pub router: axum::Router,
    #[allow(dead_code)]
    pub store: Arc<MemoryStore>,
    #[allow(dead_code)]
    pub state: AppState,
}

pub fn test_password_config() -> PasswordConfig {
    PasswordConfig::with_cost(4).unwrap()
}

/// Router over a fresh in-memory store, seeded the way the server seeds
/// itself on startup.
pub async fn setup_test_app() -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(
        store.clone(),
        test_jwt_config(),
        test_password_config(),
        CorsConfig::default(),
    );

    let seeded = UserService::ensure_default_admin(
        state.users.as_ref(),
        &SeedConfig::default(),
        &state.password_config,
    )
    .await
    .unwrap();
    assert!(seeded.is_some(), "default admin was not seeded");

    TestApp {
        router: init_router(state.clone()),
        store,
        state,
    }
}

#[allow(dead_code)]
pub async fn send(
    app: &axum::Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

#[allow(dead_code)]
pub async fn get_auth_token(app: &axum::Router) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["token"].as_str().unwrap().to_string()
}

#[allow(dead_code)]
pub fn student_payload(email: &str) -> Value {
    json!({
        "firstName": "Ada",
        "lastName": "Lovelace",
        "email": email,
        "course": "Mathematics",
        "enrollmentDate": "2024-09-01"
    })
}
