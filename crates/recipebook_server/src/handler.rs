//! Request handlers. Each one marshals input, runs one catalog call on the
//! blocking pool and marshals the result.

use crate::error::{ApiError, ApiResult};
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use recipebook_core::{
    CatalogResult, Category, CategoryDraft, EntityId, FileCatalogService, Recipe, RecipeDraft,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;

pub type SharedCatalog = Arc<FileCatalogService>;

const DELETED_MESSAGE: &str = "Deleted Successfully";

pub async fn index() -> Json<Value> {
    Json(json!({ "message": "Home Page" }))
}

pub async fn about() -> Json<Value> {
    Json(json!({ "message": "About page!" }))
}

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn list_recipes(State(catalog): State<SharedCatalog>) -> ApiResult<Json<Vec<Recipe>>> {
    run(&catalog, |catalog| catalog.list_recipes()).await.map(Json)
}

pub async fn get_recipe(
    State(catalog): State<SharedCatalog>,
    Path(id): Path<String>,
) -> ApiResult<Json<Recipe>> {
    let id = parse_id(&id)?;
    run(&catalog, move |catalog| catalog.get_recipe(id))
        .await
        .map(Json)
}

pub async fn create_recipe(
    State(catalog): State<SharedCatalog>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<Recipe>)> {
    let draft: RecipeDraft = parse_body(&body)?;
    let created = run(&catalog, move |catalog| catalog.create_recipe(draft)).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_recipe(
    State(catalog): State<SharedCatalog>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<Recipe>> {
    let id = parse_id(&id)?;
    let draft: RecipeDraft = parse_body(&body)?;
    run(&catalog, move |catalog| catalog.update_recipe(id, draft))
        .await
        .map(Json)
}

pub async fn delete_recipe(
    State(catalog): State<SharedCatalog>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let id = parse_id(&id)?;
    run(&catalog, move |catalog| catalog.delete_recipe(id)).await?;
    Ok(Json(json!({ "message": DELETED_MESSAGE })))
}

pub async fn list_categories(
    State(catalog): State<SharedCatalog>,
) -> ApiResult<Json<Vec<Category>>> {
    run(&catalog, |catalog| catalog.list_categories())
        .await
        .map(Json)
}

pub async fn get_category(
    State(catalog): State<SharedCatalog>,
    Path(id): Path<String>,
) -> ApiResult<Json<Category>> {
    let id = parse_id(&id)?;
    run(&catalog, move |catalog| catalog.get_category(id))
        .await
        .map(Json)
}

pub async fn create_category(
    State(catalog): State<SharedCatalog>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<Category>)> {
    let draft: CategoryDraft = parse_body(&body)?;
    let created = run(&catalog, move |catalog| catalog.create_category(draft)).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_category(
    State(catalog): State<SharedCatalog>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<Category>> {
    let id = parse_id(&id)?;
    let draft: CategoryDraft = parse_body(&body)?;
    run(&catalog, move |catalog| catalog.update_category(id, draft))
        .await
        .map(Json)
}

pub async fn delete_category(
    State(catalog): State<SharedCatalog>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let id = parse_id(&id)?;
    run(&catalog, move |catalog| catalog.delete_category(id)).await?;
    Ok(Json(json!({ "message": DELETED_MESSAGE })))
}

/// Runs one blocking catalog call off the async executor.
async fn run<T, F>(catalog: &SharedCatalog, op: F) -> ApiResult<T>
where
    T: Send + 'static,
    F: FnOnce(&FileCatalogService) -> CatalogResult<T> + Send + 'static,
{
    let catalog = Arc::clone(catalog);
    tokio::task::spawn_blocking(move || op(&catalog))
        .await
        .map_err(|err| ApiError::Internal(format!("catalog task failed: {err}")))?
        .map_err(ApiError::from)
}

fn parse_id(raw: &str) -> ApiResult<EntityId> {
    Uuid::parse_str(raw).map_err(|_| ApiError::BadRequest(format!("malformed id `{raw}`")))
}

fn parse_body<T: DeserializeOwned>(body: &[u8]) -> ApiResult<T> {
    serde_json::from_slice(body)
        .map_err(|err| ApiError::BadRequest(format!("malformed request body: {err}")))
}

#[cfg(test)]
mod tests {
    use super::{parse_body, parse_id};
    use crate::error::ApiError;
    use recipebook_core::RecipeDraft;

    #[test]
    fn parse_id_rejects_non_uuid() {
        assert!(matches!(parse_id("42"), Err(ApiError::BadRequest(_))));
        assert!(parse_id("6f1c2f44-5b8e-4c7d-9a4c-3d2f6b1e0a11").is_ok());
    }

    #[test]
    fn parse_body_defaults_missing_lists() {
        let draft: RecipeDraft = parse_body(br#"{"name":"Toast"}"#).unwrap();
        assert_eq!(draft, RecipeDraft::new("Toast"));
    }

    #[test]
    fn parse_body_rejects_wrong_shape() {
        let result: Result<RecipeDraft, _> = parse_body(br#"{"name": 3}"#);
        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }
}
