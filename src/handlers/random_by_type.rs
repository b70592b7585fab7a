use axum::{
    Json,
    extract::{Path, State},
};
use tracing::info;

use crate::config::Endpoint;
use crate::context::AppContext;
use crate::error::ImageError;
use crate::handlers::{RandomImageResponse, pick_random};
use crate::image_data::encode_base64;

pub const ALLOWED_TYPES: [&str; 3] = ["jpg", "png", "gif"];

/// GET /api/image/random/{type}
///
/// Unlike `/random`, `name` is the full file name including its extension.
pub async fn random_image_by_type(
    State(ctx): State<AppContext>,
    Path(image_type): Path<String>,
) -> Result<Json<RandomImageResponse>, ImageError> {
    if !ALLOWED_TYPES.contains(&image_type.as_str()) {
        return Err(ImageError::TypeNotAllowed(image_type));
    }
    ctx.ensure_enabled(Endpoint::RandomByType)?;

    let matcher = ctx.config.type_match;
    let names = ctx.store.list().await.map_err(ImageError::Load)?;
    let matching: Vec<String> = names
        .into_iter()
        .filter(|name| matcher.matches(name, &image_type))
        .collect();

    let Some(file) = pick_random(&matching).cloned() else {
        return Err(ImageError::NoFilesWithType(image_type));
    };
    let bytes = ctx.store.get(&file).await.map_err(ImageError::Load)?;

    info!(file = %file, image_type = %image_type, "[API][IMAGE] Random file by type");
    Ok(Json(RandomImageResponse {
        extension: Some(image_type),
        name: file,
        image: encode_base64(&bytes),
    }))
}
