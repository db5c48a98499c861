mod common;

use axum::http::StatusCode;
use common::{get_auth_token, send, setup_test_app, student_payload};
use registrar_db::StudentRepository;
use serde_json::json;

#[tokio::test]
async fn test_create_and_get_student() {
    let app = setup_test_app().await;
    let token = get_auth_token(&app.router).await;

    let (status, body) = send(
        &app.router,
        "POST",
        "/api/students",
        Some(&token),
        Some(student_payload("ada@example.com")),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Student created successfully");
    let student = &body["student"];
    assert_eq!(student["id"], 1);
    assert_eq!(student["status"], "active");
    assert!(student["studentId"].as_str().unwrap().starts_with("STU"));
    assert!(student["createdAt"].is_string());

    let (status, fetched) = send(&app.router, "GET", "/api/students/1", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["firstName"], "Ada");
    assert_eq!(fetched["email"], "ada@example.com");
    assert_eq!(fetched["enrollmentDate"], "2024-09-01");
    assert_eq!(fetched["studentId"], student["studentId"]);
}

#[tokio::test]
async fn test_list_students_requires_token() {
    let app = setup_test_app().await;

    let (status, body) = send(&app.router, "GET", "/api/students", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Access token required");
}

#[tokio::test]
async fn test_list_students_returns_newest_first() {
    let app = setup_test_app().await;
    let token = get_auth_token(&app.router).await;

    for email in ["one@example.com", "two@example.com"] {
        let (status, _) = send(
            &app.router,
            "POST",
            "/api/students",
            Some(&token),
            Some(student_payload(email)),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(&app.router, "GET", "/api/students", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["email"], "two@example.com");
}

#[tokio::test]
async fn test_create_duplicate_email_conflicts() {
    let app = setup_test_app().await;
    let token = get_auth_token(&app.router).await;

    send(
        &app.router,
        "POST",
        "/api/students",
        Some(&token),
        Some(student_payload("dup@example.com")),
    )
    .await;
    let (status, body) = send(
        &app.router,
        "POST",
        "/api/students",
        Some(&token),
        Some(student_payload("dup@example.com")),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Student with this email already exists");
}

#[tokio::test]
async fn test_create_validation_errors() {
    let app = setup_test_app().await;
    let token = get_auth_token(&app.router).await;

    let mut payload = student_payload("not-an-email");
    payload["firstName"] = json!("");

    let (status, body) = send(&app.router, "POST", "/api/students", Some(&token), Some(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Validation error");
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["email", "firstName"]);
}

#[tokio::test]
async fn test_create_with_bad_status_is_rejected() {
    let app = setup_test_app().await;
    let token = get_auth_token(&app.router).await;

    let mut payload = student_payload("a@example.com");
    payload["status"] = json!("expelled");

    let (status, _) = send(&app.router, "POST", "/api/students", Some(&token), Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(app.store.get_student(1).await.unwrap().is_none());
}

#[tokio::test]
async fn test_create_rejects_whitespace_only_names() {
    let app = setup_test_app().await;
    let token = get_auth_token(&app.router).await;

    let mut payload = student_payload("blank@example.com");
    payload["firstName"] = json!("   ");
    payload["course"] = json!("\t ");

    let (status, body) = send(&app.router, "POST", "/api/students", Some(&token), Some(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"firstName"));
    assert!(fields.contains(&"course"));
    assert!(app.store.get_student(1).await.unwrap().is_none());
}

#[tokio::test]
async fn test_create_trims_names_before_saving() {
    let app = setup_test_app().await;
    let token = get_auth_token(&app.router).await;

    let mut payload = student_payload("trim@example.com");
    payload["lastName"] = json!("  Lovelace ");

    let (status, body) = send(&app.router, "POST", "/api/students", Some(&token), Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["student"]["lastName"], "Lovelace");
}

#[tokio::test]
async fn test_create_missing_field_names_the_field() {
    let app = setup_test_app().await;
    let token = get_auth_token(&app.router).await;

    let mut payload = student_payload("missing@example.com");
    payload.as_object_mut().unwrap().remove("course");

    let (status, body) = send(&app.router, "POST", "/api/students", Some(&token), Some(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "course");
    assert_eq!(body["errors"][0]["message"], "course is required");
}

#[tokio::test]
async fn test_create_bad_date_names_the_field() {
    let app = setup_test_app().await;
    let token = get_auth_token(&app.router).await;

    let mut payload = student_payload("date@example.com");
    payload["enrollmentDate"] = json!("15/01/2024");

    let (status, body) = send(&app.router, "POST", "/api/students", Some(&token), Some(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "enrollmentDate");
    assert_eq!(body["errors"][0]["message"], "enrollmentDate is invalid");
}

#[tokio::test]
async fn test_get_student_invalid_id() {
    let app = setup_test_app().await;
    let token = get_auth_token(&app.router).await;

    let (status, body) = send(&app.router, "GET", "/api/students/abc", Some(&token), None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid student ID");
}

#[tokio::test]
async fn test_get_student_not_found() {
    let app = setup_test_app().await;
    let token = get_auth_token(&app.router).await;

    let (status, body) = send(&app.router, "GET", "/api/students/42", Some(&token), None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Student not found");
}

#[tokio::test]
async fn test_partial_update_only_changes_status() {
    let app = setup_test_app().await;
    let token = get_auth_token(&app.router).await;

    let (_, created) = send(
        &app.router,
        "POST",
        "/api/students",
        Some(&token),
        Some(student_payload("ada@example.com")),
    )
    .await;
    let created = &created["student"];

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    let (status, body) = send(
        &app.router,
        "PUT",
        "/api/students/1",
        Some(&token),
        Some(json!({ "status": "graduated" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Student updated successfully");
    let updated = &body["student"];
    assert_eq!(updated["status"], "graduated");
    assert_eq!(updated["firstName"], created["firstName"]);
    assert_eq!(updated["email"], created["email"]);
    assert_eq!(updated["studentId"], created["studentId"]);
    assert_eq!(updated["createdAt"], created["createdAt"]);
    assert_ne!(updated["updatedAt"], created["updatedAt"]);
}

#[tokio::test]
async fn test_update_email_owned_by_other_student_conflicts() {
    let app = setup_test_app().await;
    let token = get_auth_token(&app.router).await;

    for email in ["a@example.com", "b@example.com"] {
        send(
            &app.router,
            "POST",
            "/api/students",
            Some(&token),
            Some(student_payload(email)),
        )
        .await;
    }

    let (status, _) = send(
        &app.router,
        "PUT",
        "/api/students/2",
        Some(&token),
        Some(json!({ "email": "a@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &app.router,
        "PUT",
        "/api/students/2",
        Some(&token),
        Some(json!({ "email": "b@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_update_missing_student() {
    let app = setup_test_app().await;
    let token = get_auth_token(&app.router).await;

    let (status, _) = send(
        &app.router,
        "PUT",
        "/api/students/9",
        Some(&token),
        Some(json!({ "course": "Physics" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_null_clears_optional_field() {
    let app = setup_test_app().await;
    let token = get_auth_token(&app.router).await;

    let mut payload = student_payload("ada@example.com");
    payload["phone"] = json!("555-0100");
    payload["notes"] = json!("Scholarship");
    send(&app.router, "POST", "/api/students", Some(&token), Some(payload)).await;

    let (status, body) = send(
        &app.router,
        "PUT",
        "/api/students/1",
        Some(&token),
        Some(json!({ "phone": null })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["student"]["phone"].is_null());
    assert_eq!(body["student"]["notes"], "Scholarship");
}

#[tokio::test]
async fn test_delete_twice() {
    let app = setup_test_app().await;
    let token = get_auth_token(&app.router).await;

    send(
        &app.router,
        "POST",
        "/api/students",
        Some(&token),
        Some(student_payload("ada@example.com")),
    )
    .await;

    let (status, body) = send(&app.router, "DELETE", "/api/students/1", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Student deleted successfully");

    let (status, _) = send(&app.router, "DELETE", "/api/students/1", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_storage_outage_degrades_list_and_fails_create() {
    let app = setup_test_app().await;
    let token = get_auth_token(&app.router).await;
    app.store.set_available(false);

    let (status, body) = send(&app.router, "GET", "/api/students", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, body) = send(
        &app.router,
        "POST",
        "/api/students",
        Some(&token),
        Some(student_payload("ada@example.com")),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["message"], "Service temporarily unavailable");
}
