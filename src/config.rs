use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_UPLOADS_DIR: &str = "uploads";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Endpoints that can be switched off by configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Url,
    Save,
    Random,
    RandomByType,
}

/// Per-endpoint switches.
///
/// The by-type endpoint carries no switch unless one is configured, so
/// `random_by_type` is optional rather than defaulting to `true`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EndpointFlags {
    pub url: bool,
    pub save: bool,
    pub random: bool,
    pub random_by_type: Option<bool>,
}

impl Default for EndpointFlags {
    fn default() -> Self {
        Self {
            url: true,
            save: true,
            random: true,
            random_by_type: None,
        }
    }
}

impl EndpointFlags {
    pub fn is_enabled(&self, endpoint: Endpoint) -> bool {
        match endpoint {
            Endpoint::Url => self.url,
            Endpoint::Save => self.save,
            Endpoint::Random => self.random,
            Endpoint::RandomByType => self.random_by_type.unwrap_or(true),
        }
    }
}

/// How `GET /api/image/random/{type}` decides that a file has a type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TypeMatch {
    /// Type string appears anywhere in the file name, ignoring case.
    #[default]
    Contains,
    /// File extension equals the type, ignoring case.
    Suffix,
}

impl TypeMatch {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "contains" | "substring" => Some(Self::Contains),
            "suffix" | "extension" => Some(Self::Suffix),
            _ => None,
        }
    }

    pub fn matches(self, file_name: &str, image_type: &str) -> bool {
        let file_name = file_name.to_ascii_lowercase();
        let image_type = image_type.to_ascii_lowercase();
        match self {
            Self::Contains => file_name.contains(&image_type),
            Self::Suffix => file_name
                .rsplit_once('.')
                .is_some_and(|(stem, ext)| !stem.is_empty() && ext == image_type),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub uploads_dir: PathBuf,
    pub endpoints: EndpointFlags,
    pub type_match: TypeMatch,
    pub max_upload_bytes: usize,
    pub fetch_timeout: Option<Duration>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            uploads_dir: PathBuf::from(DEFAULT_UPLOADS_DIR),
            endpoints: EndpointFlags::default(),
            type_match: TypeMatch::default(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            fetch_timeout: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup. Blank values
    /// count as unset and unparseable values fall back to the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();
        let flag = |key: &str, default: bool| {
            get(key).and_then(|value| parse_bool(&value)).unwrap_or(default)
        };

        let endpoints = EndpointFlags {
            url: flag("ENDPOINT_URL", defaults.endpoints.url),
            save: flag("ENDPOINT_SAVE", defaults.endpoints.save),
            random: flag("ENDPOINT_RANDOM", defaults.endpoints.random),
            random_by_type: get("ENDPOINT_RANDOM_TYPE").and_then(|value| parse_bool(&value)),
        };

        Self {
            host: get("HOST")
                .map(|value| value.trim().to_string())
                .unwrap_or(defaults.host),
            port: get("PORT")
                .and_then(|value| value.trim().parse::<u16>().ok())
                .unwrap_or(defaults.port),
            uploads_dir: get("UPLOADS_DIR")
                .map(|value| PathBuf::from(value.trim()))
                .unwrap_or(defaults.uploads_dir),
            endpoints,
            type_match: get("TYPE_MATCH")
                .and_then(|value| TypeMatch::parse(&value))
                .unwrap_or(defaults.type_match),
            max_upload_bytes: get("MAX_UPLOAD_BYTES")
                .and_then(|value| value.trim().parse::<usize>().ok())
                .unwrap_or(defaults.max_upload_bytes),
            fetch_timeout: get("FETCH_TIMEOUT_SECS")
                .and_then(|value| value.trim().parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
