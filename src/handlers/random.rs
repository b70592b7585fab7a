use std::path::Path;

use anyhow::anyhow;
use axum::{Json, extract::State};
use tracing::info;

use crate::config::Endpoint;
use crate::context::AppContext;
use crate::error::ImageError;
use crate::handlers::{RandomImageResponse, pick_random};
use crate::image_data::encode_base64;

/// GET /api/image/random
///
/// Picks among every directory entry, images or not. `name` is the part of
/// the file name before the first `.`.
pub async fn random_image(
    State(ctx): State<AppContext>,
) -> Result<Json<RandomImageResponse>, ImageError> {
    ctx.ensure_enabled(Endpoint::Random)?;

    let names = ctx.store.list().await.map_err(ImageError::Load)?;
    let file = pick_random(&names)
        .cloned()
        .ok_or_else(|| {
            ImageError::Load(anyhow!("no files in {}", ctx.store.base_dir().display()))
        })?;
    let bytes = ctx.store.get(&file).await.map_err(ImageError::Load)?;

    info!(file = %file, "[API][IMAGE] Random file");
    Ok(Json(RandomImageResponse {
        extension: Path::new(&file)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_string),
        name: file.split('.').next().unwrap_or_default().to_string(),
        image: encode_base64(&bytes),
    }))
}
