use anyhow::{Context, Result};
use base64::{
    Engine,
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig, general_purpose::STANDARD},
};
use image::ImageFormat;
use url::Url;

const FALLBACK_NAME: &str = "image";
const FALLBACK_EXTENSION: &str = "bin";

/// Accepts payloads with or without trailing `=` padding.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Bytes ready to be written, with the name and extension they should be
/// stored under.
#[derive(Debug, PartialEq, Eq)]
pub struct ExtractedImage {
    pub bytes: Vec<u8>,
    pub name: String,
    pub extension: String,
}

impl ExtractedImage {
    pub fn file_name(&self, suffix: &str) -> String {
        format!("{}{}.{}", self.name, suffix, self.extension)
    }
}

/// Removes a leading `data:image/<subtype>;base64,` header if present.
pub fn strip_data_uri_prefix(payload: &str) -> &str {
    let trimmed = payload.trim_start();
    let Some(rest) = trimmed.strip_prefix("data:image/") else {
        return payload;
    };
    match rest.split_once(";base64,") {
        Some((subtype, data)) if is_mime_token(subtype) => data,
        _ => payload,
    }
}

fn is_mime_token(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

pub fn decode_base64(payload: &str) -> Result<Vec<u8>> {
    let data = strip_data_uri_prefix(payload);
    let compact: String = data.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    LENIENT.decode(compact).context("decode base64 image data")
}

pub fn encode_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Builds the stored form of a fetched resource. A body that is itself a
/// base64 data URI is decoded; anything else is kept as raw bytes.
pub fn extract_fetched(location: &Url, content_type: Option<&str>, body: Vec<u8>) -> Result<ExtractedImage> {
    let bytes = if body.starts_with(b"data:image/") {
        let text = std::str::from_utf8(&body).context("data uri body is not utf-8")?;
        decode_base64(text)?
    } else {
        body
    };

    let (url_stem, url_extension) = split_url_file_name(location);
    let extension = detect_extension(&bytes)
        .or_else(|| content_type.and_then(extension_from_mime_type))
        .map(str::to_string)
        .or(url_extension)
        .unwrap_or_else(|| FALLBACK_EXTENSION.to_string());

    Ok(ExtractedImage {
        bytes,
        name: url_stem,
        extension,
    })
}

/// Extension of the image format recognised from the leading bytes.
pub fn detect_extension(bytes: &[u8]) -> Option<&'static str> {
    match image::guess_format(bytes).ok()? {
        ImageFormat::Png => Some("png"),
        ImageFormat::Jpeg => Some("jpg"),
        ImageFormat::Gif => Some("gif"),
        ImageFormat::WebP => Some("webp"),
        ImageFormat::Bmp => Some("bmp"),
        ImageFormat::Avif => Some("avif"),
        ImageFormat::Tiff => Some("tiff"),
        ImageFormat::Ico => Some("ico"),
        _ => None,
    }
}

pub fn extension_from_mime_type(mime_type: &str) -> Option<&'static str> {
    let essence = mime_type.split(';').next().unwrap_or(mime_type).trim();
    match essence.to_lowercase().as_str() {
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/webp" => Some("webp"),
        "image/gif" => Some("gif"),
        "image/bmp" => Some("bmp"),
        "image/svg+xml" => Some("svg"),
        "image/avif" => Some("avif"),
        _ => None,
    }
}

/// Sanitised stem and lower-cased extension of the last path segment.
fn split_url_file_name(location: &Url) -> (String, Option<String>) {
    let segment = location
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or("");

    let (stem, extension) = match segment.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && is_url_extension(ext) => {
            (stem, Some(ext.to_lowercase()))
        }
        _ => (segment, None),
    };

    (sanitize_name(stem), extension)
}

fn is_url_extension(ext: &str) -> bool {
    (1..=5).contains(&ext.len()) && ext.chars().all(|c| c.is_ascii_alphanumeric())
}

fn sanitize_name(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '-' })
        .collect();
    let trimmed = cleaned.trim_matches('-');
    if trimmed.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}
