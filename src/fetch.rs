use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use url::Url;

use crate::image_data::{ExtractedImage, extract_fetched};

pub fn build_client(timeout: Option<Duration>) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().context("build http client")
}

pub fn validate_http_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        bail!("location is empty");
    }
    let parsed = Url::parse(trimmed).with_context(|| format!("invalid location {trimmed:?}"))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(anyhow!("unsupported scheme {scheme}")),
    }
}

/// Performs exactly one GET against `location` and turns the response into
/// storable image bytes.
pub async fn fetch_image(client: &reqwest::Client, location: &str) -> Result<ExtractedImage> {
    let url = validate_http_url(location)?;
    let response = client
        .get(url.clone())
        .send()
        .await
        .with_context(|| format!("fetch {url}"))?;

    let status = response.status();
    if !status.is_success() {
        bail!("fetch {url} failed: HTTP {status}");
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let body = response
        .bytes()
        .await
        .with_context(|| format!("read body of {url}"))?;

    extract_fetched(&url, content_type.as_deref(), body.to_vec())
}
