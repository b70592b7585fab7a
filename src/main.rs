use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use image_stash::{AppConfig, AppContext, build_router};

const DEFAULT_LOG_FILTER: &str = "image_stash=info,tower_http=info";

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = AppConfig::from_env();
    let bind_address = config.bind_address();
    let ctx = AppContext::new(config)?;
    ctx.store.ensure_dir().await?;

    tracing::info!(
        uploads_dir = %ctx.store.base_dir().display(),
        endpoints = ?ctx.config.endpoints,
        type_match = ?ctx.config.type_match,
        "configuration loaded"
    );

    let router = build_router(ctx);
    let tcp_listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("bind {bind_address}"))?;

    tracing::info!("Image API server started at http://{}", bind_address);

    axum::serve(tcp_listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;
    Ok(())
}
