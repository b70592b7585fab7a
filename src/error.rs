//! Error-to-HTTP response conversion.
//!
//! Every handler returns `Result<_, ImageError>`; the variant decides the
//! status code and the `{"message": ...}` body.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("Endpoint closed!")]
    EndpointClosed,

    #[error("Field error!")]
    MissingField,

    #[error("Field error!")]
    InvalidName(String),

    #[error("Type: {0} not allowed")]
    TypeNotAllowed(String),

    #[error("No files available with type: {0}")]
    NoFilesWithType(String),

    #[error("Error saving image!")]
    Upstream(#[source] anyhow::Error),

    #[error("Error saving image!")]
    Save(#[source] anyhow::Error),

    #[error("Error loading an image!")]
    Load(#[source] anyhow::Error),
}

impl ImageError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::EndpointClosed | Self::Upstream(_) | Self::Save(_) | Self::Load(_) => {
                StatusCode::LOCKED
            }
            Self::MissingField | Self::InvalidName(_) => StatusCode::NOT_ACCEPTABLE,
            Self::TypeNotAllowed(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::NoFilesWithType(_) => StatusCode::NOT_FOUND,
        }
    }
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl IntoResponse for ImageError {
    fn into_response(self) -> Response {
        match &self {
            Self::Upstream(err) | Self::Save(err) | Self::Load(err) => {
                tracing::error!(error = ?err, "[API][IMAGE] {}", self);
            }
            Self::InvalidName(name) => {
                tracing::warn!(name = %name, "[API][IMAGE] rejected file name");
            }
            _ => {}
        }

        (self.status(), Json(MessageResponse::new(self.to_string()))).into_response()
    }
}
