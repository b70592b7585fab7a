pub mod from_url;
pub mod random;
pub mod random_by_type;
pub mod save;

use rand::seq::SliceRandom;
use serde::Serialize;

pub use from_url::{UrlQuery, save_image_from_url};
pub use random::random_image;
pub use random_by_type::random_image_by_type;
pub use save::{SaveRequest, save_image};

#[derive(Debug, Serialize)]
pub struct RandomImageResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    pub name: String,
    pub image: String,
}

/// Uniform pick over `names`.
pub(crate) fn pick_random(names: &[String]) -> Option<&String> {
    names.choose(&mut rand::thread_rng())
}

/// Treats missing and empty values alike.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}
