//! Per-key async mutual exclusion
//!
//! Used to serialize tag index updates per tag and to collapse concurrent
//! `get_or_set` misses per key. Only coordinates tasks within one process.

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// A set of lazily created async mutexes, one per key
///
/// Entries are removed again once no task holds or waits on them, so the map
/// only ever contains keys that are currently contended.
#[derive(Debug, Default)]
pub struct KeyedLocks {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl KeyedLocks {
    /// Create an empty lock set
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `key`
    pub async fn lock(&self, key: &str) -> KeyedGuard<'_> {
        // Cloned under the shard lock, so cleanup in Drop never removes an
        // entry somebody is about to wait on.
        let mutex = Arc::clone(self.locks.entry(key.to_string()).or_default().value());
        let guard = mutex.lock_owned().await;
        KeyedGuard {
            locks: self,
            key: key.to_string(),
            guard: Some(guard),
        }
    }

    /// Number of keys currently locked or waited on
    pub fn active(&self) -> usize {
        self.locks.len()
    }
}

/// Exclusive access to one key; released on drop
pub struct KeyedGuard<'a> {
    locks: &'a KeyedLocks,
    key: String,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for KeyedGuard<'_> {
    fn drop(&mut self) {
        // The owned guard keeps its own Arc; release it before checking counts.
        drop(self.guard.take());
        self.locks
            .locks
            .remove_if(&self.key, |_, mutex| Arc::strong_count(mutex) == 1);
    }
}

impl std::fmt::Debug for KeyedGuard<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyedGuard").field("key", &self.key).finish()
    }
}
