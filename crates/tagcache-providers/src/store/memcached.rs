//! Memcached backing store
//!
//! Talks to one or more Memcached servers through the `memcache` crate.
//! The client is blocking, so every command runs on tokio's blocking pool.
//! Keys are distributed across servers by the client's hash function.
//!
//! ## Example
//!
//! ```ignore
//! use tagcache_providers::store::MemcachedBackingStore;
//!
//! let store = MemcachedBackingStore::connect(&["localhost:11211".into()], 4, None, None).await?;
//! ```

use crate::constants::{MEMCACHED_DEFAULT_POOL_SIZE, MEMCACHED_DEFAULT_SERVER};
use crate::registry::{BACKING_STORES, BackingStoreConfig, BackingStoreEntry};
use async_trait::async_trait;
use futures::FutureExt;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, RwLock};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tagcache_domain::constants::{
    MEMCACHED_MAX_KEY_LENGTH, MEMCACHED_MAX_RELATIVE_TTL_SECS, STORE_EVENT_CHANNEL_CAPACITY,
};
use tagcache_domain::error::{Error, Result};
use tagcache_domain::ports::{BackingStore, StoreEvent};
use tokio::sync::broadcast;

/// Memcached backing store
///
/// Holds a pooled client for the lifetime of the store. [`BackingStore::end`]
/// drops the pools; commands issued afterwards fail with [`Error::Closed`].
pub struct MemcachedBackingStore {
    client: RwLock<Option<Arc<memcache::Client>>>,
    servers: Vec<String>,
    events: broadcast::Sender<StoreEvent>,
    failures: FailureTracker,
}

/// Consecutive command failures and which of them were already announced
///
/// The client re-dials lazily, so the first command after each new failure is
/// the recovery attempt. Only that command reports `Reconnecting`.
#[derive(Debug, Default)]
struct FailureTracker {
    consecutive: AtomicU32,
    announced: AtomicU32,
}

impl FailureTracker {
    fn record_failure(&self) -> u32 {
        self.consecutive.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn record_success(&self) {
        self.consecutive.store(0, Ordering::Relaxed);
        self.announced.store(0, Ordering::Relaxed);
    }

    /// Attempt number to announce, if the latest failure has not been retried yet
    fn reconnect_attempt(&self) -> Option<u32> {
        let failures = self.consecutive.load(Ordering::Relaxed);
        if failures == 0 {
            return None;
        }
        let previous = self.announced.swap(failures, Ordering::Relaxed);
        (previous != failures).then_some(failures)
    }
}

impl MemcachedBackingStore {
    /// Connect to the given servers
    ///
    /// # Arguments
    ///
    /// * `servers` - `host:port` pairs or `memcache://` URLs
    /// * `pool_size` - Connections kept per server
    /// * `read_timeout` / `write_timeout` - Socket timeouts, `None` for the OS default
    pub async fn connect(
        servers: &[String],
        pool_size: u32,
        read_timeout: Option<Duration>,
        write_timeout: Option<Duration>,
    ) -> Result<Self> {
        let servers: Vec<String> = if servers.is_empty() {
            vec![MEMCACHED_DEFAULT_SERVER.to_string()]
        } else {
            servers.to_vec()
        };
        let urls: Vec<String> = servers.iter().map(|s| to_memcache_url(s)).collect();

        let client = tokio::task::spawn_blocking(move || {
            let client = memcache::Client::with_pool_size(urls, pool_size)?;
            client.set_read_timeout(read_timeout)?;
            client.set_write_timeout(write_timeout)?;
            Ok::<_, memcache::MemcacheError>(client)
        })
        .await
        .map_err(|e| Error::internal(format!("Memcached connect task failed: {e}")))?
        .map_err(|e| Error::backend_with_source(format!("Failed to connect to Memcached: {e}"), e))?;

        tracing::info!(servers = ?servers, pool_size, "Connected to Memcached");

        let (events, _) = broadcast::channel(STORE_EVENT_CHANNEL_CAPACITY);
        Ok(Self {
            client: RwLock::new(Some(Arc::new(client))),
            servers,
            events,
            failures: FailureTracker::default(),
        })
    }

    /// Server addresses this store was configured with
    pub fn servers(&self) -> &[String] {
        &self.servers
    }

    fn client(&self) -> Result<Arc<memcache::Client>> {
        self.client
            .read()
            .map_err(|_| Error::internal("Memcached client lock poisoned"))?
            .clone()
            .ok_or(Error::Closed)
    }

    fn server_label(&self) -> String {
        self.servers.join(",")
    }

    /// Run one blocking command, reporting failures on the event channel
    async fn run<T, F>(&self, command: &'static str, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&memcache::Client) -> std::result::Result<T, memcache::MemcacheError>
            + Send
            + 'static,
    {
        let client = self.client()?;

        if let Some(attempt) = self.failures.reconnect_attempt() {
            // Receivers may all be gone; events are diagnostic only.
            let _ = self.events.send(StoreEvent::Reconnecting {
                server: self.server_label(),
                attempt,
            });
        }

        let outcome = tokio::task::spawn_blocking(move || f(&client))
            .await
            .map_err(|e| Error::internal(format!("Memcached {command} task failed: {e}")))?;

        match outcome {
            Ok(value) => {
                self.failures.record_success();
                Ok(value)
            }
            Err(e) => {
                self.failures.record_failure();
                let message = e.to_string();
                let _ = self.events.send(StoreEvent::Failure {
                    server: self.server_label(),
                    message: message.clone(),
                });
                Err(Error::backend_with_source(
                    format!("Memcached {command} failed: {message}"),
                    e,
                ))
            }
        }
    }
}

/// Normalise a `host:port` pair into the URL form the client expects
fn to_memcache_url(server: &str) -> String {
    if server.contains("://") {
        server.to_string()
    } else {
        format!("memcache://{server}")
    }
}

/// Reject keys the memcached text protocol cannot carry
fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(Error::invalid_argument("Memcached key cannot be empty"));
    }
    if key.len() > MEMCACHED_MAX_KEY_LENGTH {
        return Err(Error::invalid_argument(format!(
            "Memcached key too long ({} bytes, max {MEMCACHED_MAX_KEY_LENGTH})",
            key.len()
        )));
    }
    if key.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(Error::invalid_argument(
            "Memcached key contains whitespace or control characters",
        ));
    }
    Ok(())
}

/// Memcached reads expirations above 30 days as absolute Unix timestamps
fn to_expiration(ttl_secs: u32) -> u32 {
    if ttl_secs <= MEMCACHED_MAX_RELATIVE_TTL_SECS {
        return ttl_secs;
    }
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    u32::try_from(now.saturating_add(u64::from(ttl_secs))).unwrap_or(u32::MAX)
}

#[async_trait]
impl BackingStore for MemcachedBackingStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        let key = key.to_string();
        self.run("get", move |client| client.get::<String>(&key)).await
    }

    async fn set(&self, key: &str, value: &str, ttl_secs: u32) -> Result<()> {
        validate_key(key)?;
        let key = key.to_string();
        let value = value.to_string();
        let expiration = to_expiration(ttl_secs);
        self.run("set", move |client| client.set(&key, value.as_str(), expiration))
            .await
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        validate_key(key)?;
        let key = key.to_string();
        self.run("delete", move |client| client.delete(&key)).await
    }

    async fn get_multi(&self, keys: &[String]) -> Result<HashMap<String, String>> {
        if keys.is_empty() {
            return Ok(HashMap::new());
        }
        for key in keys {
            validate_key(key)?;
        }
        let keys = keys.to_vec();
        self.run("gets", move |client| {
            let refs: Vec<&str> = keys.iter().map(String::as_str).collect();
            client.gets::<String>(&refs)
        })
        .await
    }

    async fn flush(&self) -> Result<()> {
        self.run("flush", |client| client.flush()).await
    }

    async fn end(&self) -> Result<()> {
        let released = self
            .client
            .write()
            .map_err(|_| Error::internal("Memcached client lock poisoned"))?
            .take();
        if released.is_some() {
            tracing::info!(servers = ?self.servers, "Memcached connection released");
        }
        Ok(())
    }

    fn events(&self) -> Option<broadcast::Receiver<StoreEvent>> {
        Some(self.events.subscribe())
    }

    fn name(&self) -> &str {
        "memcached"
    }
}

impl std::fmt::Debug for MemcachedBackingStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemcachedBackingStore")
            .field("servers", &self.servers)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Auto-registration via linkme distributed slice
// ============================================================================

/// Factory function for creating Memcached store instances.
fn memcached_store_factory(
    config: BackingStoreConfig,
) -> futures::future::BoxFuture<'static, Result<Arc<dyn BackingStore>>> {
    async move {
        let store = MemcachedBackingStore::connect(
            &config.servers,
            config.pool_size.unwrap_or(MEMCACHED_DEFAULT_POOL_SIZE),
            config.read_timeout,
            config.write_timeout,
        )
        .await?;
        Ok(Arc::new(store) as Arc<dyn BackingStore>)
    }
    .boxed()
}

#[linkme::distributed_slice(BACKING_STORES)]
static MEMCACHED_STORE: BackingStoreEntry = BackingStoreEntry {
    name: "memcached",
    description: "Memcached servers over the text protocol",
    factory: memcached_store_factory,
};
