use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use recipebook_core::StorageConfig;
use recipebook_server::{RecipeBookServer, ServerConfig};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::util::ServiceExt;
use uuid::Uuid;

fn test_app() -> (TempDir, Router) {
    let dir = tempfile::tempdir().unwrap();
    let config = ServerConfig {
        storage: StorageConfig::new(
            dir.path().join("recipes.json").to_string_lossy(),
            dir.path().join("categories.json").to_string_lossy(),
        ),
        ..ServerConfig::default()
    };
    let server = RecipeBookServer::open(config).unwrap();
    (dir, server.router())
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };
    send_request(app, request).await
}

async fn send_request(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn id_of(value: &Value) -> String {
    value["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn index_and_about_respond() {
    let (_dir, app) = test_app();

    let (status, body) = send(&app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Home Page");

    let (status, body) = send(&app, Method::GET, "/about", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "About page!");

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn empty_collections_list_as_arrays() {
    let (_dir, app) = test_app();

    let (status, body) = send(&app, Method::GET, "/recipes", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, body) = send(&app, Method::GET, "/categories", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn category_crud_roundtrip() {
    let (_dir, app) = test_app();
    let sent_id = Uuid::new_v4().to_string();

    let (status, created) = send(
        &app,
        Method::POST,
        "/categories",
        Some(json!({ "id": sent_id, "name": "Dessert" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Dessert");
    let id = id_of(&created);
    assert_ne!(id, sent_id);

    let (status, fetched) = send(&app, Method::GET, &format!("/categories/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/categories/{id}"),
        Some(json!({ "name": "Desserts" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Desserts");
    assert_eq!(id_of(&updated), id);

    let (status, body) = send(&app, Method::DELETE, &format!("/categories/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Deleted Successfully");

    let (status, body) = send(&app, Method::GET, &format!("/categories/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn deleting_category_cascades_to_recipes() {
    let (_dir, app) = test_app();
    let (_, dessert) = send(
        &app,
        Method::POST,
        "/categories",
        Some(json!({ "name": "Dessert" })),
    )
    .await;
    let category_id = id_of(&dessert);

    let (status, pie) = send(
        &app,
        Method::POST,
        "/recipes",
        Some(json!({
            "name": "Pie",
            "ingredients": ["flour"],
            "instructions": ["bake"],
            "categoryIds": [category_id],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let recipe_id = id_of(&pie);

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/categories/{category_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, reloaded) = send(&app, Method::GET, &format!("/recipes/{recipe_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reloaded["categoryIds"], json!([]));

    let (status, _) = send(
        &app,
        Method::GET,
        &format!("/categories/{category_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_recipe_replaces_every_field() {
    let (_dir, app) = test_app();
    let (_, pie) = send(
        &app,
        Method::POST,
        "/recipes",
        Some(json!({ "name": "Pie", "ingredients": ["flour"], "instructions": ["bake"] })),
    )
    .await;
    let id = id_of(&pie);

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/recipes/{id}"),
        Some(json!({ "name": "Apple Pie", "ingredients": ["apples"] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, reloaded) = send(&app, Method::GET, &format!("/recipes/{id}"), None).await;
    assert_eq!(reloaded, updated);
    assert_eq!(reloaded["id"], id);
    assert_eq!(reloaded["name"], "Apple Pie");
    assert_eq!(reloaded["instructions"], json!([]));
}

#[tokio::test]
async fn malformed_ids_are_bad_requests() {
    let (_dir, app) = test_app();

    for method in [Method::GET, Method::DELETE] {
        let (status, body) = send(&app, method, "/recipes/not-a-uuid", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "bad_request");
    }

    let (status, _) = send(
        &app,
        Method::PUT,
        "/categories/123",
        Some(json!({ "name": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_ids_are_not_found() {
    let (_dir, app) = test_app();
    let random = Uuid::new_v4();

    let (status, _) = send(&app, Method::GET, &format!("/recipes/{random}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/recipes/{random}"),
        Some(json!({ "name": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, &format!("/recipes/{random}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, &format!("/categories/{random}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_bodies_are_bad_requests() {
    let (_dir, app) = test_app();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/recipes")
        .header("content-type", "application/json")
        .body(Body::from("{ nope"))
        .unwrap();
    let (status, body) = send_request(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");

    let (status, body) = send(&app, Method::POST, "/categories", Some(json!({ "name": "  " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation");

    let (status, body) = send(
        &app,
        Method::POST,
        "/recipes",
        Some(json!({ "name": "Pie", "categoryIds": [Uuid::new_v4()] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation");
}

#[tokio::test]
async fn duplicate_category_name_is_rejected() {
    let (_dir, app) = test_app();
    let (status, _) = send(&app, Method::POST, "/categories", Some(json!({ "name": "Soup" }))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, Method::POST, "/categories", Some(json!({ "name": "Soup" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("Soup"));
}

#[tokio::test]
async fn corrupt_storage_is_a_server_error() {
    let (dir, app) = test_app();
    std::fs::write(dir.path().join("recipes.json"), "garbage").unwrap();

    let (status, body) = send(&app, Method::GET, "/recipes", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "storage");
}
