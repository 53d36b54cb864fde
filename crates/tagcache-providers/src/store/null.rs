//! Null backing store
//!
//! A store that doesn't keep anything. Useful for disabling caching without
//! changing call sites.

use async_trait::async_trait;
use futures::FutureExt;
use std::collections::HashMap;
use std::sync::Arc;
use tagcache_domain::error::Result;
use tagcache_domain::ports::BackingStore;

use crate::registry::{BACKING_STORES, BackingStoreConfig, BackingStoreEntry};

/// Null backing store that doesn't store anything
///
/// Every read misses and every write succeeds without storing the data.
///
/// # Example
///
/// ```rust
/// use tagcache_providers::store::NullBackingStore;
///
/// let store = NullBackingStore::new();
/// // All operations succeed but nothing is cached
/// ```
#[derive(Debug, Clone, Default)]
pub struct NullBackingStore;

impl NullBackingStore {
    /// Create a new null store
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl BackingStore for NullBackingStore {
    async fn get(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: &str, _ttl_secs: u32) -> Result<()> {
        Ok(())
    }

    async fn delete(&self, _key: &str) -> Result<bool> {
        Ok(false)
    }

    async fn get_multi(&self, _keys: &[String]) -> Result<HashMap<String, String>> {
        Ok(HashMap::new())
    }

    async fn flush(&self) -> Result<()> {
        Ok(())
    }

    async fn end(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "null"
    }
}

#[linkme::distributed_slice(BACKING_STORES)]
static NULL_STORE: BackingStoreEntry = BackingStoreEntry {
    name: "null",
    description: "No-op store, every read misses",
    factory: |_config: BackingStoreConfig| {
        async { Ok(Arc::new(NullBackingStore::new()) as Arc<dyn BackingStore>) }.boxed()
    },
};
