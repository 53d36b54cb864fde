//! Tag-aware cache provider
//!
//! Public façade composing [`KeyCodec`], [`ValueCodec`], [`TagIndex`] and a
//! [`BackingStore`].
//!
//! Two error policies apply throughout:
//!
//! - **Reads degrade to a miss.** `get`, `get_raw`, `has` and `get_many`
//!   swallow backend errors and report nothing found.
//! - **Writes fail loud.** `set`, `set_many`, `clear` and `get_or_set`
//!   propagate backend errors with their message intact.
//!
//! `delete`/`delete_many` report failures as "not deleted", and
//! `invalidate_tag` never fails because of the backend. Every operation
//! returns [`Error::Closed`] once [`CacheProvider::close`] has run.
//!
//! The provider holds no lock around operations. Concurrent calls may
//! interleave at the backend; see [`TagConsistency`] and [`GetOrSetMode`]
//! for the two read-modify-write paths where that matters.

use super::events::spawn_event_logger;
use super::key_codec::KeyCodec;
use super::keyed_lock::KeyedLocks;
use super::tag_index::TagIndex;
use super::value_codec::ValueCodec;
use crate::config::CacheConfig;
use futures::future::join_all;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tagcache_domain::constants::DEFAULT_KEY_PREFIX;
use tagcache_domain::error::{Error, Result};
use tagcache_domain::ports::BackingStore;
use tagcache_domain::value_objects::{
    CacheOptions, CacheStats, CachedValue, GetOrSetMode, TagConsistency,
};
use tagcache_providers::registry::resolve_backing_store;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Settings fixed for the lifetime of a provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheProviderSettings {
    /// Prefix prepended to every caller key
    pub key_prefix: String,
    /// Coordination of tag index appends
    pub tag_consistency: TagConsistency,
    /// Handling of concurrent `get_or_set` misses
    pub get_or_set: GetOrSetMode,
}

impl Default for CacheProviderSettings {
    fn default() -> Self {
        Self {
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
            tag_consistency: TagConsistency::default(),
            get_or_set: GetOrSetMode::default(),
        }
    }
}

impl CacheProviderSettings {
    /// Set the key prefix
    pub fn with_key_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    /// Set the tag consistency mode
    pub fn with_tag_consistency(mut self, consistency: TagConsistency) -> Self {
        self.tag_consistency = consistency;
        self
    }

    /// Set the `get_or_set` mode
    pub fn with_get_or_set(mut self, mode: GetOrSetMode) -> Self {
        self.get_or_set = mode;
        self
    }
}

#[derive(Debug, Default)]
struct StatsCounters {
    hits: AtomicU64,
    misses: AtomicU64,
    read_errors: AtomicU64,
    writes: AtomicU64,
}

impl StatsCounters {
    fn hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    fn miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    fn read_error(&self) {
        self.read_errors.fetch_add(1, Ordering::Relaxed);
        self.miss();
    }

    fn write(&self) {
        self.writes.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            read_errors: self.read_errors.load(Ordering::Relaxed),
            writes: self.writes.load(Ordering::Relaxed),
        }
    }
}

/// Tag-aware cache provider
///
/// Share it across tasks behind an `Arc`.
///
/// # Example
///
/// ```ignore
/// use tagcache_domain::CacheOptions;
///
/// let opts = CacheOptions::new().with_ttl_secs(300).with_tag("user:42");
/// cache.set("profile:42", &profile, &opts).await?;
/// cache.set("avatar:42", &avatar_url, &opts).await?;
///
/// // Later: drop everything that belongs to user 42
/// cache.invalidate_tag("user:42").await?;
/// ```
pub struct CacheProvider {
    store: Arc<dyn BackingStore>,
    keys: KeyCodec,
    tags: TagIndex,
    get_or_set_mode: GetOrSetMode,
    flights: KeyedLocks,
    closed: AtomicBool,
    stats: StatsCounters,
    event_logger: Mutex<Option<JoinHandle<()>>>,
}

// Construction
impl CacheProvider {
    /// Wrap an already connected store
    ///
    /// When called inside a tokio runtime, the store's diagnostic events are
    /// logged until the provider is closed.
    pub fn new(store: Arc<dyn BackingStore>, settings: CacheProviderSettings) -> Self {
        let keys = KeyCodec::new(settings.key_prefix);
        let tags = TagIndex::new(Arc::clone(&store), keys.clone(), settings.tag_consistency);
        let event_logger = store
            .events()
            .and_then(|events| spawn_event_logger(store.name().to_string(), events));

        Self {
            store,
            keys,
            tags,
            get_or_set_mode: settings.get_or_set,
            flights: KeyedLocks::new(),
            closed: AtomicBool::new(false),
            stats: StatsCounters::default(),
            event_logger: Mutex::new(event_logger),
        }
    }

    /// Resolve the configured backing store, connect it and wrap it
    pub async fn connect(config: &CacheConfig) -> Result<Self> {
        let store = resolve_backing_store(config.store_config()).await?;
        info!(
            store = store.name(),
            key_prefix = %config.key_prefix,
            tag_consistency = ?config.tag_consistency,
            get_or_set = ?config.get_or_set,
            "Cache provider connected"
        );
        Ok(Self::new(store, config.provider_settings()))
    }

    /// The prefix applied to every key
    pub fn key_prefix(&self) -> &str {
        self.keys.prefix()
    }

    /// The tag index backing `invalidate_tag`
    pub fn tag_index(&self) -> &TagIndex {
        &self.tags
    }

    /// Name of the underlying store
    pub fn store_name(&self) -> &str {
        self.store.name()
    }

    /// Counters accumulated since construction
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot()
    }

    /// Whether `close()` has been called
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    fn ensure_open(&self) -> Result<()> {
        if self.is_closed() {
            return Err(Error::Closed);
        }
        Ok(())
    }
}

// Read path
impl CacheProvider {
    /// Get a typed value; `None` on miss, backend error or type mismatch
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        Ok(self.get_raw(key).await?.and_then(ValueCodec::decode))
    }

    /// Get the stored value without committing to a type
    ///
    /// JSON text comes back as [`CachedValue::Json`], anything else as
    /// [`CachedValue::Raw`].
    pub async fn get_raw(&self, key: &str) -> Result<Option<CachedValue>> {
        self.ensure_open()?;
        let fq_key = self.keys.encode(key);

        match self.store.get(&fq_key).await {
            Ok(Some(text)) => {
                self.stats.hit();
                Ok(Some(ValueCodec::deserialize(&text)))
            }
            Ok(None) => {
                self.stats.miss();
                debug!(key = %fq_key, "Cache miss");
                Ok(None)
            }
            Err(e) => {
                self.stats.read_error();
                warn!(key = %fq_key, error = %e, "Cache read failed; treating as miss");
                Ok(None)
            }
        }
    }

    /// Whether a value is stored under `key`
    pub async fn has(&self, key: &str) -> Result<bool> {
        Ok(self.get_raw(key).await?.is_some())
    }

    /// Get several typed values in one backend round trip
    ///
    /// The map is keyed by caller key; misses are simply absent. An empty
    /// input returns immediately without touching the backend.
    pub async fn get_many<T, K>(&self, keys: &[K]) -> Result<HashMap<String, T>>
    where
        T: DeserializeOwned,
        K: AsRef<str>,
    {
        self.ensure_open()?;
        if keys.is_empty() {
            return Ok(HashMap::new());
        }

        let fq_keys: Vec<String> = keys.iter().map(|k| self.keys.encode(k.as_ref())).collect();
        let mut found = match self.store.get_multi(&fq_keys).await {
            Ok(found) => found,
            Err(e) => {
                warn!(count = keys.len(), error = %e, "Batch cache read failed; treating as misses");
                for _ in keys {
                    self.stats.read_error();
                }
                return Ok(HashMap::new());
            }
        };

        let mut values = HashMap::with_capacity(found.len());
        for (key, fq_key) in keys.iter().zip(&fq_keys) {
            let decoded = found
                .remove(fq_key)
                .and_then(|text| ValueCodec::decode(ValueCodec::deserialize(&text)));
            match decoded {
                Some(value) => {
                    self.stats.hit();
                    values.insert(key.as_ref().to_string(), value);
                }
                None => self.stats.miss(),
            }
        }
        Ok(values)
    }
}

// Write path
impl CacheProvider {
    /// Store a value, then index it under each tag in `options`
    ///
    /// The value is written first; tag updates follow, one per tag, each
    /// independent of the others. Any backend failure is returned.
    #[tracing::instrument(level = "debug", skip(self, value, options), fields(ttl = options.ttl_secs, tags = options.tags.len()))]
    pub async fn set<T>(&self, key: &str, value: &T, options: &CacheOptions) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        self.ensure_open()?;
        let fq_key = self.keys.encode(key);
        self.write_value(&fq_key, value, options.ttl_secs).await?;
        self.index_under_tags(&[fq_key], &options.tags).await
    }

    /// Store several values under the same options
    ///
    /// Values are written independently; there is no atomicity across them.
    /// Each tag then gets a single index update listing every key that was
    /// written, so entries of one batch never race each other on a tag. The
    /// first failure is returned after every write has been attempted.
    #[tracing::instrument(level = "debug", skip_all, fields(entries = entries.len(), tags = options.tags.len()))]
    pub async fn set_many<K, T>(&self, entries: &[(K, T)], options: &CacheOptions) -> Result<()>
    where
        K: AsRef<str>,
        T: Serialize,
    {
        self.ensure_open()?;
        let fq_keys: Vec<String> = entries
            .iter()
            .map(|(key, _)| self.keys.encode(key.as_ref()))
            .collect();
        let outcomes = join_all(
            fq_keys
                .iter()
                .zip(entries)
                .map(|(fq_key, (_, value))| self.write_value(fq_key, value, options.ttl_secs)),
        )
        .await;

        let mut first_error = None;
        let mut written = Vec::with_capacity(fq_keys.len());
        for (fq_key, outcome) in fq_keys.into_iter().zip(outcomes) {
            match outcome {
                Ok(()) => written.push(fq_key),
                Err(e) => {
                    warn!(key = %fq_key, error = %e, "Batch cache write failed");
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
            }
        }

        let indexed = self.index_under_tags(&written, &options.tags).await;
        match first_error {
            Some(e) => Err(e),
            None => indexed,
        }
    }

    async fn write_value<T>(&self, fq_key: &str, value: &T, ttl_secs: u32) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let text = ValueCodec::serialize(value)?;
        self.store.set(fq_key, &text, ttl_secs).await?;
        self.stats.write();
        Ok(())
    }

    /// One index update per tag, each covering all of `fq_keys`
    async fn index_under_tags(&self, fq_keys: &[String], tags: &[String]) -> Result<()> {
        if fq_keys.is_empty() || tags.is_empty() {
            return Ok(());
        }
        let updates = join_all(tags.iter().map(|tag| self.tags.add_keys_to_tag(tag, fq_keys))).await;
        updates.into_iter().collect()
    }

    /// Delete one key; `false` if the backend did not delete it or failed
    pub async fn delete(&self, key: &str) -> Result<bool> {
        self.ensure_open()?;
        let fq_key = self.keys.encode(key);
        match self.store.delete(&fq_key).await {
            Ok(deleted) => Ok(deleted),
            Err(e) => {
                warn!(key = %fq_key, error = %e, "Cache delete failed");
                Ok(false)
            }
        }
    }

    /// Delete several keys; returns how many the backend confirmed
    pub async fn delete_many<K: AsRef<str>>(&self, keys: &[K]) -> Result<usize> {
        self.ensure_open()?;
        if keys.is_empty() {
            return Ok(0);
        }

        let fq_keys: Vec<String> = keys.iter().map(|k| self.keys.encode(k.as_ref())).collect();
        let outcomes = join_all(fq_keys.iter().map(|k| self.store.delete(k))).await;

        let mut deleted = 0;
        for (fq_key, outcome) in fq_keys.iter().zip(outcomes) {
            match outcome {
                Ok(true) => deleted += 1,
                Ok(false) => {}
                Err(e) => warn!(key = %fq_key, error = %e, "Cache delete failed"),
            }
        }
        Ok(deleted)
    }

    /// Evict every key indexed under `tag`, then the tag itself
    ///
    /// Best effort; backend failures are logged, never returned.
    pub async fn invalidate_tag(&self, tag: &str) -> Result<()> {
        self.ensure_open()?;
        self.tags.invalidate_tag(tag).await;
        Ok(())
    }

    /// Flush the whole backend
    ///
    /// Not scoped to this provider's prefix: every key in the backend goes,
    /// including those of other providers sharing it.
    pub async fn clear(&self) -> Result<()> {
        self.ensure_open()?;
        warn!(store = self.store.name(), "Flushing entire backing store");
        self.store.flush().await
    }

    /// Return the cached value, or compute, store and return it
    ///
    /// On a hit `factory` is never called. On a miss it is called once for
    /// this call and its value is persisted with `set`. With
    /// [`GetOrSetMode::Independent`] concurrent misses each run their own
    /// factory; with [`GetOrSetMode::SingleFlight`] later callers wait for
    /// the first and read its result back from the cache.
    pub async fn get_or_set<T, F, Fut, E>(
        &self,
        key: &str,
        factory: F,
        options: &CacheOptions,
    ) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<T, E>>,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        if let Some(cached) = self.get::<T>(key).await? {
            return Ok(cached);
        }

        match self.get_or_set_mode {
            GetOrSetMode::Independent => self.compute_and_store(key, factory, options).await,
            GetOrSetMode::SingleFlight => {
                let _flight = self.flights.lock(key).await;
                if let Some(cached) = self.get::<T>(key).await? {
                    debug!(key, "Value computed by a concurrent caller");
                    return Ok(cached);
                }
                self.compute_and_store(key, factory, options).await
            }
        }
    }

    async fn compute_and_store<T, F, Fut, E>(
        &self,
        key: &str,
        factory: F,
        options: &CacheOptions,
    ) -> Result<T>
    where
        T: Serialize,
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<T, E>>,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        let value = factory().await.map_err(Error::factory)?;
        self.set(key, &value, options).await?;
        Ok(value)
    }
}

// Lifecycle
impl CacheProvider {
    /// Release the backend connection
    ///
    /// Runs once; any later call, including a second `close`, returns
    /// [`Error::Closed`].
    pub async fn close(&self) -> Result<()> {
        if self.closed.swap(true, Ordering::AcqRel) {
            return Err(Error::Closed);
        }

        let logger = self
            .event_logger
            .lock()
            .map_err(|_| Error::internal("Event logger lock poisoned"))?
            .take();
        if let Some(handle) = logger {
            handle.abort();
        }

        self.store.end().await?;
        info!(store = self.store.name(), "Cache provider closed");
        Ok(())
    }
}

impl std::fmt::Debug for CacheProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheProvider")
            .field("store", &self.store.name())
            .field("key_prefix", &self.keys.prefix())
            .field("tag_consistency", &self.tags.consistency())
            .field("get_or_set", &self.get_or_set_mode)
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}
