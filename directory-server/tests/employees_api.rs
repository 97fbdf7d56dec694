//! Employee REST API, driven in-process through the full router

mod common;

use axum::body::Body;
use common::{app, delete, get, json, send};
use http::{Request, StatusCode, header};
use serde_json::json;

fn ada() -> serde_json::Value {
    json!({"name": "Ada", "position": "Engineer", "department": "R&D", "email": "Ada@X.com"})
}

#[tokio::test]
async fn test_create_returns_201_envelope() {
    let app = app().await;
    let (status, body) = json(&app, "POST", "/api/employees", ada()).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Employee created successfully");
    assert_eq!(body["data"]["email"], "ada@x.com");
    assert!(body["data"]["id"].is_string());
    assert!(body["data"]["createdAt"].is_string());
    assert!(body["data"]["updatedAt"].is_string());
    assert!(body.get("count").is_none());
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn test_list_has_count_and_no_message() {
    let app = app().await;
    json(&app, "POST", "/api/employees", ada()).await;
    json(
        &app,
        "POST",
        "/api/employees",
        json!({"name": "Bob", "position": "Designer", "department": "UX", "email": "bob@x.com"}),
    )
    .await;

    let (status, body) = get(&app, "/api/employees").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 2);
    assert!(body.get("message").is_none());

    let names: Vec<_> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Bob", "Ada"]);
}

#[tokio::test]
async fn test_list_empty() {
    let app = app().await;
    let (status, body) = get(&app, "/api/employees").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "count": 0, "data": []}));
}

#[tokio::test]
async fn test_get_one() {
    let app = app().await;
    let (_, created) = json(&app, "POST", "/api/employees", ada()).await;
    let id = created["data"]["id"].as_str().unwrap();

    let (status, body) = get(&app, &format!("/api/employees/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"], created["data"]);
    assert!(body.get("message").is_none());
}

#[tokio::test]
async fn test_get_unknown_is_404() {
    let app = app().await;
    let (status, body) = get(&app, "/api/employees/does-not-exist").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"success": false, "message": "Employee not found"}));
}

#[tokio::test]
async fn test_create_missing_field_is_400() {
    let app = app().await;
    let (status, body) = json(
        &app,
        "POST",
        "/api/employees",
        json!({"name": "Ada", "position": "Engineer", "email": "ada@x.com"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"success": false, "message": "All fields are required"}));
}

#[tokio::test]
async fn test_create_blank_field_is_400() {
    let app = app().await;
    let (status, body) = json(
        &app,
        "POST",
        "/api/employees",
        json!({"name": "   ", "position": "Engineer", "department": "R&D", "email": "ada@x.com"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "All fields are required");
}

#[tokio::test]
async fn test_create_duplicate_email_is_400() {
    let app = app().await;
    json(&app, "POST", "/api/employees", ada()).await;

    let (status, body) = json(
        &app,
        "POST",
        "/api/employees",
        json!({"name": "Other", "position": "PM", "department": "Ops", "email": "ADA@X.COM"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"success": false, "message": "Employee with this email already exists"})
    );
}

#[tokio::test]
async fn test_malformed_body_is_400() {
    let app = app().await;
    let (status, body) = send(
        &app,
        Request::builder()
            .method("POST")
            .uri("/api/employees")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Invalid request body");
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_update_replaces_fields() {
    let app = app().await;
    let (_, created) = json(&app, "POST", "/api/employees", ada()).await;
    let id = created["data"]["id"].as_str().unwrap();

    let (status, body) = json(
        &app,
        "PUT",
        &format!("/api/employees/{id}"),
        json!({"name": "Ada L.", "position": "Lead", "department": "R&D", "email": "ada@x.com"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Employee updated successfully");
    assert_eq!(body["data"]["id"], id);
    assert_eq!(body["data"]["position"], "Lead");
    assert_eq!(body["data"]["createdAt"], created["data"]["createdAt"]);
}

#[tokio::test]
async fn test_update_unknown_is_404() {
    let app = app().await;
    let (status, body) = json(&app, "PUT", "/api/employees/missing", ada()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Employee not found");
}

#[tokio::test]
async fn test_update_missing_email_is_400() {
    let app = app().await;
    let (_, created) = json(&app, "POST", "/api/employees", ada()).await;
    let id = created["data"]["id"].as_str().unwrap();

    let (status, body) = json(
        &app,
        "PUT",
        &format!("/api/employees/{id}"),
        json!({"name": "Ada", "position": "Engineer", "department": "R&D"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "All fields are required");
}

#[tokio::test]
async fn test_update_to_taken_email_is_400() {
    let app = app().await;
    json(&app, "POST", "/api/employees", ada()).await;
    let (_, bob) = json(
        &app,
        "POST",
        "/api/employees",
        json!({"name": "Bob", "position": "Designer", "department": "UX", "email": "bob@x.com"}),
    )
    .await;
    let id = bob["data"]["id"].as_str().unwrap();

    let (status, body) = json(
        &app,
        "PUT",
        &format!("/api/employees/{id}"),
        json!({"name": "Bob", "position": "Designer", "department": "UX", "email": "ada@x.com"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Employee with this email already exists");
}

#[tokio::test]
async fn test_delete_then_get_is_404() {
    let app = app().await;
    let (_, created) = json(&app, "POST", "/api/employees", ada()).await;
    let uri = format!("/api/employees/{}", created["data"]["id"].as_str().unwrap());

    let (status, body) = delete(&app, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"success": true, "message": "Employee deleted successfully"})
    );

    let (status, _) = get(&app, &uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = delete(&app, &uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Employee not found");
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let app = app().await;
    let response = tower::ServiceExt::oneshot(
        app,
        Request::builder()
            .uri("/api/employees")
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}
