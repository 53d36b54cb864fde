//! Backing Store Implementations
//!
//! ## Store Selection Guide
//!
//! - **Tests / single process**: `MokaBackingStore`
//! - **Shared cache**: `MemcachedBackingStore` or `RedisBackingStore`
//! - **Caching disabled**: `NullBackingStore`

#[cfg(feature = "store-memcached")]
pub mod memcached;
#[cfg(feature = "store-moka")]
pub mod moka;
pub mod null;
#[cfg(feature = "store-redis")]
pub mod redis;

#[cfg(feature = "store-memcached")]
pub use memcached::MemcachedBackingStore;
#[cfg(feature = "store-moka")]
pub use moka::MokaBackingStore;
pub use null::NullBackingStore;
#[cfg(feature = "store-redis")]
pub use redis::RedisBackingStore;
