//! # tagcache
//!
//! Tag-indexed caching on top of a simple key-value backing store.
//!
//! Values are stored as JSON text under `prefix + key`. Writes may carry tags;
//! every tag keeps a list of the keys written under it, so a whole group of
//! entries can be evicted with one [`CacheProvider::invalidate_tag`] call
//! without the caller tracking which keys belong together.
//!
//! ## Features
//!
//! - **Typed access**: `get::<T>`, `set`, batch variants and `get_or_set`
//! - **Tag invalidation**: secondary index stored in the backend itself
//! - **Pluggable stores**: Memcached, Redis, Moka (in-process) and Null,
//!   resolved by name from configuration
//! - **Raw fallback**: text written by other producers comes back as
//!   [`CachedValue::Raw`] instead of failing
//!
//! ## Example
//!
//! ```ignore
//! use tagcache::{CacheOptions, CacheProvider, ConfigLoader};
//!
//! let config = ConfigLoader::new().load()?;
//! let cache = CacheProvider::connect(&config.cache).await?;
//!
//! let opts = CacheOptions::new().with_ttl_secs(600).with_tag("catalog");
//! let price: u64 = cache
//!     .get_or_set("price:sku-1", || fetch_price("sku-1"), &opts)
//!     .await?;
//!
//! // Prices changed upstream
//! cache.invalidate_tag("catalog").await?;
//! cache.close().await?;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - Error type, value objects and the `BackingStore` port
//! - `providers` - Backing store implementations and their registry
//! - `infrastructure` - Codecs, tag index, the provider, config and logging

/// Domain layer - error type, value objects and ports
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use tagcache_domain::*;
}

/// Providers layer - backing store implementations
///
/// Re-exports from the providers crate for convenience
pub mod providers {
    pub use tagcache_providers::*;
}

/// Infrastructure layer - cache provider, config and logging
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use tagcache_infrastructure::*;
}

// Re-export commonly used domain types at the crate root
pub use domain::*;

// Re-export the provider and its configuration at the crate root
pub use infrastructure::cache::{CacheProvider, CacheProviderSettings};
pub use infrastructure::config::{AppConfig, CacheConfig, ConfigLoader};
pub use infrastructure::logging::init_logging;
