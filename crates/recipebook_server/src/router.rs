use crate::handler::{self, SharedCatalog};
use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use log::info;
use std::time::Instant;

/// Build the axum router with every catalog endpoint.
pub fn build_router(catalog: SharedCatalog) -> Router {
    Router::new()
        .route("/", get(handler::index))
        .route("/about", get(handler::about))
        .route("/health", get(handler::health))
        .route(
            "/recipes",
            get(handler::list_recipes).post(handler::create_recipe),
        )
        .route(
            "/recipes/:id",
            get(handler::get_recipe)
                .put(handler::update_recipe)
                .delete(handler::delete_recipe),
        )
        .route(
            "/categories",
            get(handler::list_categories).post(handler::create_category),
        )
        .route(
            "/categories/:id",
            get(handler::get_category)
                .put(handler::update_category)
                .delete(handler::delete_category),
        )
        .layer(middleware::from_fn(log_request))
        .with_state(catalog)
}

async fn log_request(request: Request, next: Next) -> Response {
    let started_at = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    info!(
        "event=http_request module=http method={} path={} code={} duration_ms={}",
        method,
        path,
        response.status().as_u16(),
        started_at.elapsed().as_millis()
    );
    response
}
