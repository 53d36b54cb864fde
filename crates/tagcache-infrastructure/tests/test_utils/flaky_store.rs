//! Moka-backed store with injectable failures and call counters

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tagcache_domain::error::{Error, Result};
use tagcache_domain::ports::BackingStore;
use tagcache_infrastructure::cache::{CacheProvider, CacheProviderSettings};
use tagcache_providers::store::MokaBackingStore;

/// Backing store that behaves like Moka until told to fail
#[derive(Debug, Default)]
pub struct FlakyStore {
    inner: MokaBackingStore,
    fail_reads: AtomicBool,
    yield_commands: AtomicBool,
    fail_next_set: Mutex<Option<String>>,
    fail_sets: Mutex<HashMap<String, String>>,
    fail_deletes: Mutex<HashSet<String>>,
    pub get_calls: AtomicUsize,
    pub get_multi_calls: AtomicUsize,
    pub set_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
    pub end_calls: AtomicUsize,
}

impl FlakyStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make every `get` and `get_multi` fail until reset
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Yield to the scheduler before every command, like a network store
    pub fn yield_commands(&self, enabled: bool) {
        self.yield_commands.store(enabled, Ordering::SeqCst);
    }

    async fn maybe_yield(&self) {
        if self.yield_commands.load(Ordering::SeqCst) {
            tokio::task::yield_now().await;
        }
    }

    /// Make the next `set` fail with `message`
    pub fn fail_next_set(&self, message: &str) {
        *self.fail_next_set.lock().unwrap() = Some(message.to_string());
    }

    /// Make every `set` of this fully-qualified key fail with `message`
    pub fn fail_set_of(&self, fq_key: &str, message: &str) {
        self.fail_sets
            .lock()
            .unwrap()
            .insert(fq_key.to_string(), message.to_string());
    }

    /// Make deletes of this fully-qualified key fail
    pub fn fail_delete_of(&self, fq_key: &str) {
        self.fail_deletes.lock().unwrap().insert(fq_key.to_string());
    }

    /// Write text directly, bypassing any provider encoding
    pub async fn put_raw(&self, fq_key: &str, text: &str) {
        self.inner.set(fq_key, text, 0).await.unwrap();
    }

    /// Read text directly
    pub async fn read_raw(&self, fq_key: &str) -> Option<String> {
        self.inner.get(fq_key).await.unwrap()
    }

    pub fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BackingStore for FlakyStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.maybe_yield().await;
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Error::backend("connection reset"));
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str, ttl_secs: u32) -> Result<()> {
        self.set_calls.fetch_add(1, Ordering::SeqCst);
        self.maybe_yield().await;
        let refused = self
            .fail_next_set
            .lock()
            .unwrap()
            .take()
            .or_else(|| self.fail_sets.lock().unwrap().get(key).cloned());
        if let Some(message) = refused {
            return Err(Error::backend(message));
        }
        self.inner.set(key, value, ttl_secs).await
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        self.maybe_yield().await;
        let refused = self.fail_deletes.lock().unwrap().contains(key);
        if refused {
            return Err(Error::backend(format!("cannot delete {key}")));
        }
        self.inner.delete(key).await
    }

    async fn get_multi(&self, keys: &[String]) -> Result<HashMap<String, String>> {
        self.get_multi_calls.fetch_add(1, Ordering::SeqCst);
        self.maybe_yield().await;
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Error::backend("connection reset"));
        }
        self.inner.get_multi(keys).await
    }

    async fn flush(&self) -> Result<()> {
        self.inner.flush().await
    }

    async fn end(&self) -> Result<()> {
        self.end_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.end().await
    }

    fn name(&self) -> &str {
        "flaky"
    }
}

/// Provider over a fresh [`FlakyStore`] with default settings
pub fn flaky_provider() -> (CacheProvider, Arc<FlakyStore>) {
    flaky_provider_with(CacheProviderSettings::default())
}

/// Provider over a fresh [`FlakyStore`]
pub fn flaky_provider_with(settings: CacheProviderSettings) -> (CacheProvider, Arc<FlakyStore>) {
    let store = FlakyStore::new();
    let provider = CacheProvider::new(store.clone(), settings);
    (provider, store)
}
