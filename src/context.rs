use std::sync::Arc;

use anyhow::Result;

use crate::config::{AppConfig, Endpoint};
use crate::error::ImageError;
use crate::fetch::build_client;
use crate::storage::ImageStore;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<AppConfig>,
    pub store: ImageStore,
    pub http: reqwest::Client,
}

impl AppContext {
    pub fn new(config: AppConfig) -> Result<Self> {
        let http = build_client(config.fetch_timeout)?;
        let store = ImageStore::new(config.uploads_dir.clone());
        Ok(Self {
            config: Arc::new(config),
            store,
            http,
        })
    }

    pub fn ensure_enabled(&self, endpoint: Endpoint) -> Result<(), ImageError> {
        if self.config.endpoints.is_enabled(endpoint) {
            Ok(())
        } else {
            Err(ImageError::EndpointClosed)
        }
    }
}
