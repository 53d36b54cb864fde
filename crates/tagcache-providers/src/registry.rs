//! Backing Store Registry
//!
//! Auto-registration system for backing stores. Each store submits a
//! [`BackingStoreEntry`] into [`BACKING_STORES`] with `linkme`, and the cache
//! provider resolves one by name at runtime.

use futures::future::BoxFuture;
use std::sync::Arc;
use std::time::Duration;
use tagcache_domain::error::{Error, Result};
use tagcache_domain::ports::BackingStore;

/// Configuration for backing store creation
///
/// Contains every option a store might need. Stores use what they need and
/// ignore the rest.
#[derive(Debug, Clone, Default)]
pub struct BackingStoreConfig {
    /// Store name (e.g., "memcached", "redis", "moka", "null")
    pub backend: String,
    /// Server addresses; empty means the store's default
    pub servers: Vec<String>,
    /// Connections per server
    pub pool_size: Option<u32>,
    /// Socket read timeout
    pub read_timeout: Option<Duration>,
    /// Socket write timeout
    pub write_timeout: Option<Duration>,
    /// Entry capacity for in-process stores
    pub max_capacity: Option<u64>,
}

impl BackingStoreConfig {
    /// Create a new config with the given store name
    pub fn new(backend: impl Into<String>) -> Self {
        Self {
            backend: backend.into(),
            ..Default::default()
        }
    }

    /// Add a server address
    pub fn with_server(mut self, server: impl Into<String>) -> Self {
        self.servers.push(server.into());
        self
    }

    /// Set the connection pool size
    pub fn with_pool_size(mut self, pool_size: u32) -> Self {
        self.pool_size = Some(pool_size);
        self
    }

    /// Set the read timeout
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    /// Set the write timeout
    pub fn with_write_timeout(mut self, timeout: Duration) -> Self {
        self.write_timeout = Some(timeout);
        self
    }

    /// Set the entry capacity
    pub fn with_max_capacity(mut self, max_capacity: u64) -> Self {
        self.max_capacity = Some(max_capacity);
        self
    }
}

/// Factory signature shared by every registered store
pub type BackingStoreFactory =
    fn(BackingStoreConfig) -> BoxFuture<'static, Result<Arc<dyn BackingStore>>>;

/// Registry entry for backing stores
pub struct BackingStoreEntry {
    /// Unique store name
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Factory function to create a connected store
    pub factory: BackingStoreFactory,
}

#[linkme::distributed_slice]
pub static BACKING_STORES: [BackingStoreEntry] = [..];

/// Resolve and connect a backing store by name
///
/// # Returns
/// * `Ok(Arc<dyn BackingStore>)` - Connected store
/// * `Err(Error::Configuration)` - No store registered under that name
/// * `Err(Error::Backend)` - Store found but connecting failed
pub async fn resolve_backing_store(config: BackingStoreConfig) -> Result<Arc<dyn BackingStore>> {
    let Some(entry) = BACKING_STORES.iter().find(|e| e.name == config.backend) else {
        let available: Vec<&str> = BACKING_STORES.iter().map(|e| e.name).collect();
        return Err(Error::configuration(format!(
            "Unknown backing store '{}'. Available stores: {:?}",
            config.backend, available
        )));
    };

    tracing::debug!(store = entry.name, servers = ?config.servers, "Connecting backing store");
    (entry.factory)(config).await
}

/// List all registered backing stores as (name, description) pairs
pub fn list_backing_stores() -> Vec<(&'static str, &'static str)> {
    BACKING_STORES
        .iter()
        .map(|e| (e.name, e.description))
        .collect()
}
