use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{debug, info};

use crate::config::Endpoint;
use crate::context::AppContext;
use crate::error::{ImageError, MessageResponse};
use crate::handlers::non_empty;
use crate::image_data::decode_base64;
use crate::storage::is_plain_file_name;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SaveRequest {
    #[serde(deserialize_with = "truthy_scalar")]
    pub image: Option<String>,
    #[serde(deserialize_with = "truthy_scalar")]
    pub extension: Option<String>,
    #[serde(deserialize_with = "truthy_scalar")]
    pub name: Option<String>,
}

/// Strings pass through, non-zero numbers and `true` are stringified.
/// `null`, `false`, `0`, arrays and objects count as absent.
fn truthy_scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| match value {
        Value::String(text) => Some(text),
        Value::Number(number) if number.as_f64() != Some(0.0) => Some(number.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }))
}

/// POST /api/image/save
///
/// Stores the decoded payload as `<name>.<extension>`, overwriting any file
/// of the same name. The extension is not checked against the content.
pub async fn save_image(
    State(ctx): State<AppContext>,
    body: Result<Json<SaveRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ImageError> {
    ctx.ensure_enabled(Endpoint::Save)?;

    let Json(request) = body.map_err(|rejection| {
        debug!(error = %rejection, "[API][IMAGE] unreadable save body");
        ImageError::MissingField
    })?;
    let (Some(image), Some(extension), Some(name)) = (
        non_empty(request.image),
        non_empty(request.extension),
        non_empty(request.name),
    ) else {
        return Err(ImageError::MissingField);
    };

    let file_name = format!("{name}.{extension}");
    if !is_plain_file_name(&file_name) {
        return Err(ImageError::InvalidName(file_name));
    }

    let bytes = decode_base64(&image).map_err(ImageError::Save)?;
    ctx.store
        .put(&file_name, &bytes)
        .await
        .map_err(ImageError::Save)?;

    info!(file = %file_name, size = bytes.len(), "[API][IMAGE] Saved!");
    Ok(Json(MessageResponse::new("Image saved!")))
}
