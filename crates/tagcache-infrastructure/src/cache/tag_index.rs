//! Tag index for bulk invalidation
//!
//! Each tag owns a reserved key (`prefix + "_tag:" + tag`) whose value is a
//! JSON array of the fully-qualified keys written under that tag. Appending
//! costs one extra read and at most one extra write per tagged `set`;
//! invalidating costs one delete per listed key.
//!
//! Appends are read-modify-write. With [`TagConsistency::BestEffort`] two
//! concurrent appends to one tag can lose a key from the list. The key is
//! still cached, only no longer reachable by [`TagIndex::invalidate_tag`].

use super::key_codec::KeyCodec;
use super::keyed_lock::{KeyedGuard, KeyedLocks};
use super::value_codec::ValueCodec;
use futures::future::join_all;
use std::sync::Arc;
use tagcache_domain::constants::NO_EXPIRY;
use tagcache_domain::error::Result;
use tagcache_domain::ports::BackingStore;
use tagcache_domain::value_objects::TagConsistency;
use tracing::{debug, warn};

/// Maintains the tag -> keys mapping inside the backing store
#[derive(Debug)]
pub struct TagIndex {
    store: Arc<dyn BackingStore>,
    keys: KeyCodec,
    consistency: TagConsistency,
    locks: KeyedLocks,
}

impl TagIndex {
    /// Create an index over `store` using the reserved keys of `keys`
    pub fn new(store: Arc<dyn BackingStore>, keys: KeyCodec, consistency: TagConsistency) -> Self {
        Self {
            store,
            keys,
            consistency,
            locks: KeyedLocks::new(),
        }
    }

    /// The configured consistency mode
    pub fn consistency(&self) -> TagConsistency {
        self.consistency
    }

    /// Record `fq_key` under `tag`
    ///
    /// A missing, unreadable or corrupt list counts as empty. Appending a key
    /// that is already listed writes nothing. Only the final write can fail.
    pub async fn add_key_to_tag(&self, tag: &str, fq_key: &str) -> Result<()> {
        self.add_keys_to_tag(tag, &[fq_key]).await
    }

    /// Record several keys under `tag` with one read and at most one write
    ///
    /// Callers writing a batch under a shared tag must use this rather than
    /// one `add_key_to_tag` per key, which would race on the same list.
    pub async fn add_keys_to_tag<K: AsRef<str>>(&self, tag: &str, fq_keys: &[K]) -> Result<()> {
        if fq_keys.is_empty() {
            return Ok(());
        }
        let _serialized = self.serialize(tag).await;
        let tag_key = self.keys.tag_key(tag);

        let mut listed = self.read_list(&tag_key).await;
        let before = listed.len();
        for fq_key in fq_keys {
            let fq_key = fq_key.as_ref();
            if !listed.iter().any(|k| k == fq_key) {
                listed.push(fq_key.to_string());
            }
        }
        if listed.len() == before {
            debug!(tag, keys = fq_keys.len(), "Keys already indexed under tag");
            return Ok(());
        }

        let text = ValueCodec::serialize(&listed)?;
        self.store.set(&tag_key, &text, NO_EXPIRY).await?;
        debug!(tag, added = listed.len() - before, indexed = listed.len(), "Keys added to tag");
        Ok(())
    }

    /// Delete every key listed under `tag`, then the tag's own entry
    ///
    /// Best effort: read failures behave like an empty list and individual
    /// delete failures are logged and skipped. Never returns an error.
    pub async fn invalidate_tag(&self, tag: &str) {
        let _serialized = self.serialize(tag).await;
        let tag_key = self.keys.tag_key(tag);
        let listed = self.read_list(&tag_key).await;

        let outcomes = join_all(listed.iter().map(|key| self.store.delete(key))).await;
        let mut deleted = 0usize;
        for (key, outcome) in listed.iter().zip(outcomes) {
            match outcome {
                Ok(true) => deleted += 1,
                Ok(false) => debug!(tag, key = key.as_str(), "Tagged key already gone"),
                Err(e) => warn!(tag, key = key.as_str(), error = %e, "Failed to delete tagged key"),
            }
        }

        if let Err(e) = self.store.delete(&tag_key).await {
            warn!(tag, error = %e, "Failed to delete tag index entry");
        }
        debug!(tag, listed = listed.len(), deleted, "Tag invalidated");
    }

    /// Keys currently listed under `tag`
    pub async fn keys_for_tag(&self, tag: &str) -> Vec<String> {
        self.read_list(&self.keys.tag_key(tag)).await
    }

    async fn serialize(&self, tag: &str) -> Option<KeyedGuard<'_>> {
        match self.consistency {
            TagConsistency::BestEffort => None,
            TagConsistency::Serialized => Some(self.locks.lock(tag).await),
        }
    }

    async fn read_list(&self, tag_key: &str) -> Vec<String> {
        match self.store.get(tag_key).await {
            Ok(Some(text)) => serde_json::from_str(&text).unwrap_or_else(|e| {
                warn!(tag_key, error = %e, "Tag index entry is not a key list; treating as empty");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(tag_key, error = %e, "Failed to read tag index; treating as empty");
                Vec::new()
            }
        }
    }
}
