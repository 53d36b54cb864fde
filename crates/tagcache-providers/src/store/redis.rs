//! Redis backing store
//!
//! Alternative network backend for deployments that already run Redis.
//! Uses a [`ConnectionManager`], which multiplexes commands over one
//! connection and re-establishes it after failures.
//!
//! ## Example
//!
//! ```ignore
//! use tagcache_providers::store::RedisBackingStore;
//!
//! let store = RedisBackingStore::connect("redis://localhost:6379").await?;
//! ```

use crate::constants::REDIS_DEFAULT_SERVER;
use crate::registry::{BACKING_STORES, BackingStoreConfig, BackingStoreEntry};
use async_trait::async_trait;
use futures::FutureExt;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client, RedisError};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use tagcache_domain::constants::{NO_EXPIRY, STORE_EVENT_CHANNEL_CAPACITY};
use tagcache_domain::error::{Error, Result};
use tagcache_domain::ports::{BackingStore, StoreEvent};
use tokio::sync::broadcast;

/// Redis backing store
#[derive(Clone)]
pub struct RedisBackingStore {
    connection: ConnectionManager,
    server: String,
    events: broadcast::Sender<StoreEvent>,
    consecutive_failures: Arc<AtomicU32>,
    closed: Arc<AtomicBool>,
}

impl RedisBackingStore {
    /// Connect with a connection string
    ///
    /// # Arguments
    ///
    /// * `connection_string` - Redis URL (e.g., "redis://localhost:6379") or a bare `host:port`
    pub async fn connect(connection_string: &str) -> Result<Self> {
        let url = if connection_string.contains("://") {
            connection_string.to_string()
        } else {
            format!("redis://{connection_string}")
        };

        let client = Client::open(url.as_str()).map_err(|e| {
            Error::backend_with_source(format!("Failed to create Redis client: {e}"), e)
        })?;
        let connection = ConnectionManager::new(client).await.map_err(|e| {
            Error::backend_with_source(format!("Failed to connect to Redis: {e}"), e)
        })?;

        tracing::info!(server = %url, "Connected to Redis");

        let (events, _) = broadcast::channel(STORE_EVENT_CHANNEL_CAPACITY);
        Ok(Self {
            connection,
            server: url,
            events,
            consecutive_failures: Arc::new(AtomicU32::new(0)),
            closed: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Get the Redis server address
    pub fn server_address(&self) -> &str {
        &self.server
    }

    fn connection(&self) -> Result<ConnectionManager> {
        if self.closed.load(Ordering::Acquire) {
            return Err(Error::Closed);
        }
        Ok(self.connection.clone())
    }

    /// Record the outcome of a command and translate Redis errors
    fn observe<T>(&self, command: &str, result: redis::RedisResult<T>) -> Result<T> {
        match result {
            Ok(value) => {
                self.consecutive_failures.store(0, Ordering::Relaxed);
                Ok(value)
            }
            Err(e) => {
                let attempt = self.consecutive_failures.fetch_add(1, Ordering::Relaxed) + 1;
                // Receivers may all be gone; events are diagnostic only.
                let _ = self.events.send(StoreEvent::Failure {
                    server: self.server.clone(),
                    message: e.to_string(),
                });
                if e.is_connection_dropped() || e.is_io_error() {
                    let _ = self.events.send(StoreEvent::Reconnecting {
                        server: self.server.clone(),
                        attempt,
                    });
                }
                Err(redis_error(command, e))
            }
        }
    }
}

fn redis_error(command: &str, e: RedisError) -> Error {
    let code = e.code().map(str::to_string);
    Error::Backend {
        message: format!("Redis {command} failed: {e}"),
        code,
        source: Some(Box::new(e)),
    }
}

#[async_trait]
impl BackingStore for RedisBackingStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.connection()?;
        let result = conn.get::<_, Option<String>>(key).await;
        self.observe("GET", result)
    }

    async fn set(&self, key: &str, value: &str, ttl_secs: u32) -> Result<()> {
        let mut conn = self.connection()?;
        let result: redis::RedisResult<()> = if ttl_secs == NO_EXPIRY {
            conn.set(key, value).await
        } else {
            conn.set_ex(key, value, u64::from(ttl_secs)).await
        };
        self.observe("SET", result)
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let mut conn = self.connection()?;
        let result: redis::RedisResult<i64> = conn.del(key).await;
        self.observe("DEL", result).map(|count| count > 0)
    }

    async fn get_multi(&self, keys: &[String]) -> Result<HashMap<String, String>> {
        if keys.is_empty() {
            return Ok(HashMap::new());
        }
        let mut conn = self.connection()?;
        let result: redis::RedisResult<Vec<Option<String>>> =
            redis::cmd("MGET").arg(keys).query_async(&mut conn).await;
        let values = self.observe("MGET", result)?;

        Ok(keys
            .iter()
            .zip(values)
            .filter_map(|(key, value)| value.map(|v| (key.clone(), v)))
            .collect())
    }

    async fn flush(&self) -> Result<()> {
        let mut conn = self.connection()?;
        let result: redis::RedisResult<()> = redis::cmd("FLUSHDB").query_async(&mut conn).await;
        self.observe("FLUSHDB", result)
    }

    async fn end(&self) -> Result<()> {
        // The manager closes its connection once the last clone is dropped.
        if !self.closed.swap(true, Ordering::AcqRel) {
            tracing::info!(server = %self.server, "Redis connection released");
        }
        Ok(())
    }

    fn events(&self) -> Option<broadcast::Receiver<StoreEvent>> {
        Some(self.events.subscribe())
    }

    fn name(&self) -> &str {
        "redis"
    }
}

impl std::fmt::Debug for RedisBackingStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisBackingStore")
            .field("server", &self.server)
            .field("closed", &self.closed.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Auto-registration via linkme distributed slice
// ============================================================================

/// Factory function for creating Redis store instances.
fn redis_store_factory(
    config: BackingStoreConfig,
) -> futures::future::BoxFuture<'static, Result<Arc<dyn BackingStore>>> {
    async move {
        if config.servers.len() > 1 {
            tracing::warn!(
                servers = ?config.servers,
                "Redis store uses a single server; ignoring all but the first"
            );
        }
        let server = config
            .servers
            .first()
            .map_or(REDIS_DEFAULT_SERVER, String::as_str);
        let store = RedisBackingStore::connect(server).await?;
        Ok(Arc::new(store) as Arc<dyn BackingStore>)
    }
    .boxed()
}

#[linkme::distributed_slice(BACKING_STORES)]
static REDIS_STORE: BackingStoreEntry = BackingStoreEntry {
    name: "redis",
    description: "Redis server via a managed connection",
    factory: redis_store_factory,
};
