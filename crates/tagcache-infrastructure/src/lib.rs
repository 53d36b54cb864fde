//! # Infrastructure Layer
//!
//! The tag-indexed cache itself plus the cross-cutting concerns around it.
//! Store implementations live in `tagcache-providers`.
//!
//! ## Module Categories
//!
//! ### Caching
//! | Module | Description |
//! |--------|-------------|
//! | [`cache`] | Key/value codecs, tag index and the `CacheProvider` façade |
//!
//! ### Configuration
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | TOML + environment configuration via figment |
//! | [`constants`] | Centralized configuration constants |
//!
//! ### Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`logging`] | Structured logging with tracing |

pub mod cache;
pub mod config;
pub mod constants;
pub mod error_ext;
pub mod logging;

// Re-export commonly used types
pub use cache::{CacheProvider, CacheProviderSettings};
pub use config::{AppConfig, CacheConfig, ConfigLoader};
pub use error_ext::ErrorContext;
