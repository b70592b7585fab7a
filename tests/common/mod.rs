//! Shared harness for router-level tests.
//!
//! [`TestHarness`] owns a temporary uploads directory and an [`AppContext`]
//! pointing at it. Requests are driven through the router with `oneshot`.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::Path;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use image_stash::config::EndpointFlags;
use image_stash::{AppConfig, AppContext, build_router};

pub struct TestHarness {
    pub dir: TempDir,
    pub ctx: AppContext,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_config(|_| {})
    }

    pub fn with_config(configure: impl FnOnce(&mut AppConfig)) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let mut config = AppConfig {
            uploads_dir: dir.path().to_path_buf(),
            ..AppConfig::default()
        };
        configure(&mut config);
        let ctx = AppContext::new(config).expect("build context");
        Self { dir, ctx }
    }

    pub fn all_closed() -> Self {
        Self::with_config(|config| {
            config.endpoints = EndpointFlags {
                url: false,
                save: false,
                random: false,
                random_by_type: Some(false),
            };
        })
    }

    pub fn uploads(&self) -> &Path {
        self.dir.path()
    }

    pub fn write_file(&self, name: &str, contents: &[u8]) {
        std::fs::write(self.uploads().join(name), contents).expect("write fixture");
    }

    pub fn file_names(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.uploads())
            .expect("read uploads")
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    pub fn router(&self) -> Router {
        build_router(self.ctx.clone())
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::get(uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    pub async fn post_json(&self, uri: &str, body: &Value) -> (StatusCode, Value) {
        let request = Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }
}

/// Starts a throwaway upstream server on an ephemeral port.
pub async fn spawn_upstream(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

pub const PNG_BYTES: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52,
];

pub const GIF_BYTES: &[u8] = b"GIF89a\x01\x00\x01\x00\x00\x00\x00;";
