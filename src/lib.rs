pub mod config;
pub mod context;
pub mod error;
pub mod fetch;
pub mod handlers;
pub mod image_data;
pub mod router;
pub mod storage;

pub use config::AppConfig;
pub use context::AppContext;
pub use router::build_router;
