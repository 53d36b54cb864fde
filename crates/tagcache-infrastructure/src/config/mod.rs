//! Configuration management
//!
//! Figment-based loading of [`AppConfig`] from defaults, a TOML file and
//! `TAGCACHE__`-prefixed environment variables.

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{AppConfig, BackendTuningOptions, CacheConfig, LoggingConfig, ServerList};
