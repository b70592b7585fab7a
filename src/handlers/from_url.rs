use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use chrono::Utc;
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::Endpoint;
use crate::context::AppContext;
use crate::error::{ImageError, MessageResponse};
use crate::fetch::fetch_image;
use crate::handlers::non_empty;

#[derive(Debug, Deserialize)]
pub struct UrlQuery {
    pub location: Option<String>,
}

/// GET /api/image/url?location=...
pub async fn save_image_from_url(
    State(ctx): State<AppContext>,
    query: Result<Query<UrlQuery>, QueryRejection>,
) -> Result<Json<MessageResponse>, ImageError> {
    ctx.ensure_enabled(Endpoint::Url)?;
    let Query(query) = query.map_err(|rejection| {
        debug!(error = %rejection, "[API][IMAGE] unreadable url query");
        ImageError::MissingField
    })?;
    let location = non_empty(query.location).ok_or(ImageError::MissingField)?;

    let image = fetch_image(&ctx.http, &location)
        .await
        .map_err(ImageError::Upstream)?;

    let file_name = image.file_name(&format!("-{}", Utc::now().timestamp_millis()));
    ctx.store
        .put(&file_name, &image.bytes)
        .await
        .map_err(ImageError::Save)?;

    info!(file = %file_name, location = %location, "[API][IMAGE] Saved!");
    Ok(Json(MessageResponse::new("Image saved!")))
}
