//! Configuration types

mod app;
mod cache;
mod logging;

pub use app::AppConfig;
pub use cache::{BackendTuningOptions, CacheConfig, ServerList};
pub use logging::LoggingConfig;
