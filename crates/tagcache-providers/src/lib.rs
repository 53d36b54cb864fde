//! # tagcache - Backing Store Implementations
//!
//! Every store implements the `BackingStore` port defined in
//! `tagcache-domain` and registers itself in [`registry::BACKING_STORES`].
//!
//! | Store | Feature | Description |
//! |-------|---------|-------------|
//! | [`store::MokaBackingStore`] | `store-moka` | In-process store with per-entry TTL |
//! | `MemcachedBackingStore` | `store-memcached` | Memcached servers via the `memcache` crate |
//! | `RedisBackingStore` | `store-redis` | Redis via a managed multiplexed connection |
//! | [`store::NullBackingStore`] | always | Stores nothing |
//!
//! ## Feature Flags
//!
//! ```toml
//! [dependencies]
//! tagcache-providers = { version = "0.1", default-features = false, features = ["store-memcached"] }
//! ```

// Re-export domain types commonly used with stores
pub use tagcache_domain::error::{Error, Result};
pub use tagcache_domain::ports::{BackingStore, StoreEvent};

/// Provider-specific constants
pub mod constants;

/// Link-time registry of backing store factories
pub mod registry;

/// Backing store implementations
pub mod store;
