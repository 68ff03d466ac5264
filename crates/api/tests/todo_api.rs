//! Integration tests for the `/api/todos` endpoints and the HTML listing.

mod common;

use axum::http::{header, Method, StatusCode};
use common::{body_bytes, body_json, delete, get, memory_app, post_json, put_json, send_json};
use serde_json::json;

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_returns_201_with_defaults() {
    let app = memory_app();
    let response = post_json(
        app,
        "/api/todos",
        json!({ "title": "Buy milk", "description": "2 litres" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let todo = body_json(response).await;
    assert_eq!(todo["title"], "Buy milk");
    assert_eq!(todo["description"], "2 litres");
    assert_eq!(todo["completed"], false);
    assert!(todo["id"].is_i64());
    assert_eq!(todo["created_at"], todo["updated_at"]);
}

#[tokio::test]
async fn create_without_description_stores_null() {
    let app = memory_app();
    let response = post_json(app, "/api/todos", json!({ "title": "Bare" })).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let todo = body_json(response).await;
    assert!(todo["description"].is_null());
}

#[tokio::test]
async fn create_without_title_returns_400() {
    let app = memory_app();
    let response = post_json(app, "/api/todos", json!({ "description": "no title" })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Title is required");
}

#[tokio::test]
async fn create_with_empty_title_returns_400() {
    let app = memory_app();
    let response = post_json(app, "/api/todos", json!({ "title": "" })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Title is required");
}

#[tokio::test]
async fn create_with_malformed_json_returns_400() {
    let app = memory_app();
    let response = send_json(app, Method::POST, "/api/todos", "{not json".into()).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_returns_newest_first() {
    let app = memory_app();
    for title in ["one", "two", "three"] {
        let response = post_json(app.clone(), "/api/todos", json!({ "title": title })).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = get(app, "/api/todos").await;
    assert_eq!(response.status(), StatusCode::OK);

    let todos = body_json(response).await;
    let titles: Vec<&str> = todos
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, ["three", "two", "one"]);
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[tokio::test]
async fn update_completed_only_keeps_other_fields() {
    let app = memory_app();
    let created = body_json(
        post_json(
            app.clone(),
            "/api/todos",
            json!({ "title": "Write report", "description": "Q3" }),
        )
        .await,
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let response = put_json(
        app,
        &format!("/api/todos/{id}"),
        json!({ "completed": true }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let updated = body_json(response).await;
    assert_eq!(updated["completed"], true);
    assert_eq!(updated["title"], "Write report");
    assert_eq!(updated["description"], "Q3");
    assert_eq!(updated["created_at"], created["created_at"]);

    let before: chrono::DateTime<chrono::Utc> =
        serde_json::from_value(created["updated_at"].clone()).unwrap();
    let after: chrono::DateTime<chrono::Utc> =
        serde_json::from_value(updated["updated_at"].clone()).unwrap();
    assert!(after > before);
}

#[tokio::test]
async fn update_with_null_description_clears_it() {
    let app = memory_app();
    let created = body_json(
        post_json(
            app.clone(),
            "/api/todos",
            json!({ "title": "a", "description": "d" }),
        )
        .await,
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let response = put_json(
        app.clone(),
        &format!("/api/todos/{id}"),
        json!({ "description": null }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let updated = body_json(response).await;
    assert!(updated["description"].is_null());
    assert_eq!(updated["title"], "a");

    let listed = body_json(get(app, "/api/todos").await).await;
    assert!(listed[0]["description"].is_null());
}

#[tokio::test]
async fn update_without_description_keeps_it() {
    let app = memory_app();
    let created = body_json(
        post_json(
            app.clone(),
            "/api/todos",
            json!({ "title": "a", "description": "d" }),
        )
        .await,
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let response = put_json(app, &format!("/api/todos/{id}"), json!({ "title": "b" })).await;
    let updated = body_json(response).await;
    assert_eq!(updated["title"], "b");
    assert_eq!(updated["description"], "d");
}

#[tokio::test]
async fn update_unknown_id_returns_404() {
    let app = memory_app();
    let response = put_json(app, "/api/todos/999", json!({ "title": "x" })).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Not found");
}

#[tokio::test]
async fn update_with_blank_title_returns_400() {
    let app = memory_app();
    let created = body_json(post_json(app.clone(), "/api/todos", json!({ "title": "a" })).await).await;
    let id = created["id"].as_i64().unwrap();

    let response = put_json(app, &format!("/api/todos/{id}"), json!({ "title": " " })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_body_is_rejected_before_id_lookup() {
    let app = memory_app();
    let response = send_json(app, Method::PUT, "/api/todos/999", "{oops".into()).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn non_numeric_id_returns_404() {
    let app = memory_app();
    let response = put_json(app, "/api/todos/abc", json!({ "completed": true })).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Not found");
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn delete_known_id_removes_it_from_list() {
    let app = memory_app();
    let created = body_json(post_json(app.clone(), "/api/todos", json!({ "title": "tmp" })).await).await;
    let id = created["id"].as_i64().unwrap();

    let response = delete(app.clone(), &format!("/api/todos/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(response).await.is_empty());

    let todos = body_json(get(app.clone(), "/api/todos").await).await;
    assert!(todos.as_array().unwrap().is_empty());

    let again = delete(app, &format!("/api/todos/{id}")).await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_unknown_id_returns_404() {
    let app = memory_app();
    let response = delete(app, "/api/todos/12345").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Not found");
}

// ---------------------------------------------------------------------------
// HTML listing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn index_renders_html_listing() {
    let app = memory_app();
    post_json(app.clone(), "/api/todos", json!({ "title": "Visible <b>item</b>" })).await;

    let response = get(app, "/").await;
    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));

    let html = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(html.contains("Visible &lt;b&gt;item&lt;/b&gt;"));
}
