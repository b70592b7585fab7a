use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;

use crate::context::AppContext;
use crate::handlers;

pub fn build_router(ctx: AppContext) -> Router {
    let max_upload_bytes = ctx.config.max_upload_bytes;

    let image_routes = Router::new()
        .route("/url", get(handlers::save_image_from_url))
        .route(
            "/save",
            post(handlers::save_image).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/random", get(handlers::random_image))
        .route("/random/{type}", get(handlers::random_image_by_type));

    Router::new()
        .route("/health", get(health))
        .nest("/api/image", image_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
