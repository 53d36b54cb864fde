//! Moka in-process backing store
//!
//! Concurrent in-memory store using Moka. Each entry carries its own TTL,
//! enforced through a Moka [`Expiry`] policy, so it behaves like a single
//! Memcached server living inside the process.
//!
//! ## Example
//!
//! ```ignore
//! use tagcache_providers::store::MokaBackingStore;
//!
//! let store = MokaBackingStore::with_capacity(10_000);
//! ```

use crate::constants::MOKA_DEFAULT_MAX_CAPACITY;
use crate::registry::{BACKING_STORES, BackingStoreConfig, BackingStoreEntry};
use async_trait::async_trait;
use futures::FutureExt;
use moka::Expiry;
use moka::future::Cache;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tagcache_domain::constants::NO_EXPIRY;
use tagcache_domain::error::Result;
use tagcache_domain::ports::BackingStore;

#[derive(Debug, Clone)]
struct StoredEntry {
    value: Arc<str>,
    ttl: Option<Duration>,
}

impl StoredEntry {
    fn new(value: &str, ttl_secs: u32) -> Self {
        let ttl = (ttl_secs != NO_EXPIRY).then(|| Duration::from_secs(u64::from(ttl_secs)));
        Self {
            value: Arc::from(value),
            ttl,
        }
    }
}

/// Applies the TTL stored alongside each entry
struct EntryExpiry;

impl Expiry<String, StoredEntry> for EntryExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &StoredEntry,
        _created_at: Instant,
    ) -> Option<Duration> {
        value.ttl
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &StoredEntry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        value.ttl
    }
}

/// Moka-based in-process backing store
#[derive(Clone)]
pub struct MokaBackingStore {
    cache: Cache<String, StoredEntry>,
    max_capacity: u64,
}

impl Default for MokaBackingStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MokaBackingStore {
    /// Create a new store with default capacity
    pub fn new() -> Self {
        Self::with_capacity(MOKA_DEFAULT_MAX_CAPACITY)
    }

    /// Create a new store holding at most `max_capacity` entries
    pub fn with_capacity(max_capacity: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .expire_after(EntryExpiry)
            .build();

        Self {
            cache,
            max_capacity,
        }
    }

    /// Get the maximum capacity of the store
    pub fn max_capacity(&self) -> u64 {
        self.max_capacity
    }

    /// Number of live entries, after running pending maintenance
    pub async fn entry_count(&self) -> u64 {
        self.cache.run_pending_tasks().await;
        self.cache.entry_count()
    }
}

#[async_trait]
impl BackingStore for MokaBackingStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .cache
            .get(key)
            .await
            .map(|entry| entry.value.to_string()))
    }

    async fn set(&self, key: &str, value: &str, ttl_secs: u32) -> Result<()> {
        self.cache
            .insert(key.to_string(), StoredEntry::new(value, ttl_secs))
            .await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        Ok(self.cache.remove(key).await.is_some())
    }

    async fn get_multi(&self, keys: &[String]) -> Result<HashMap<String, String>> {
        let mut found = HashMap::with_capacity(keys.len());
        for key in keys {
            if let Some(entry) = self.cache.get(key).await {
                found.insert(key.clone(), entry.value.to_string());
            }
        }
        Ok(found)
    }

    async fn flush(&self) -> Result<()> {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
        Ok(())
    }

    async fn end(&self) -> Result<()> {
        // Nothing to release; entries stay readable by other handles.
        Ok(())
    }

    fn name(&self) -> &str {
        "moka"
    }
}

impl std::fmt::Debug for MokaBackingStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaBackingStore")
            .field("max_capacity", &self.max_capacity)
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}

// ============================================================================
// Auto-registration via linkme
// ============================================================================

#[linkme::distributed_slice(BACKING_STORES)]
static MOKA_STORE: BackingStoreEntry = BackingStoreEntry {
    name: "moka",
    description: "Moka in-process store with per-entry TTL",
    factory: |config: BackingStoreConfig| {
        async move {
            let store = config
                .max_capacity
                .map_or_else(MokaBackingStore::new, MokaBackingStore::with_capacity);
            Ok(Arc::new(store) as Arc<dyn BackingStore>)
        }
        .boxed()
    },
};
