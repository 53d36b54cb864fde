//! Backing Store Port
//!
//! Minimal key-value primitives the cache layer is built on. The contract is
//! the lowest common denominator of Memcached-style servers: text values,
//! per-entry TTL in seconds, batched reads and an unscoped flush.
//!
//! ## Provider Pattern
//!
//! Implementations live in `tagcache-providers` and register themselves in
//! its link-time registry, so the façade can be built from configuration
//! without naming a concrete type.

use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::broadcast;

/// Diagnostic notification emitted by network-backed stores
///
/// These are logged by the cache provider and never surfaced to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// A command against a server failed
    Failure {
        /// Server address the failure refers to
        server: String,
        /// Backend error message
        message: String,
    },
    /// The client is re-establishing its connection to a server
    Reconnecting {
        /// Server address being reconnected
        server: String,
        /// Consecutive reconnect attempt number, starting at 1
        attempt: u32,
    },
}

/// Backing Store Port
///
/// # Implementations
///
/// - **Moka**: in-process store with per-entry TTL
/// - **Memcached**: the native network backend
/// - **Redis**: alternative network backend
/// - **Null**: stores nothing, for disabling the cache
///
/// # Example
///
/// ```ignore
/// use tagcache_domain::ports::BackingStore;
///
/// store.set("cache:user:1", "{\"name\":\"ada\"}", 300).await?;
/// let hit = store.get("cache:user:1").await?;
/// ```
#[async_trait]
pub trait BackingStore: Send + Sync + std::fmt::Debug {
    /// Read a value; `Ok(None)` means the key is not present
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value
    ///
    /// # Arguments
    /// * `key` - Fully-qualified key
    /// * `value` - Serialized text
    /// * `ttl_secs` - Time to live in seconds, `0` for no expiry
    async fn set(&self, key: &str, value: &str, ttl_secs: u32) -> Result<()>;

    /// Delete a key
    ///
    /// # Returns
    /// True if the backend reports the key was deleted
    async fn delete(&self, key: &str) -> Result<bool>;

    /// Read many keys at once
    ///
    /// Missing keys are simply absent from the returned map.
    async fn get_multi(&self, keys: &[String]) -> Result<HashMap<String, String>>;

    /// Remove every key in the backend, not only those under one prefix
    async fn flush(&self) -> Result<()>;

    /// Release the connection to the backend
    async fn end(&self) -> Result<()>;

    /// Subscribe to diagnostic events
    ///
    /// Stores without a network connection return `None`.
    fn events(&self) -> Option<broadcast::Receiver<StoreEvent>> {
        None
    }

    /// Get the name/identifier of this store implementation
    fn name(&self) -> &str;
}
