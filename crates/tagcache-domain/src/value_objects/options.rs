//! Per-call cache options

use crate::constants::NO_EXPIRY;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Options attached to a write
///
/// Only used at write time. The TTL goes to the backing store; the tags go to
/// the tag index.
///
/// # Example
///
/// ```
/// use tagcache_domain::CacheOptions;
///
/// let opts = CacheOptions::new().with_ttl_secs(600).with_tag("users");
/// assert_eq!(opts.ttl_secs, 600);
/// assert_eq!(opts.tags, vec!["users".to_string()]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheOptions {
    /// Time to live in seconds, `0` for no expiry
    #[serde(default)]
    pub ttl_secs: u32,
    /// Tags the written key is indexed under
    #[serde(default)]
    pub tags: Vec<String>,
}

impl CacheOptions {
    /// Options with no expiry and no tags
    pub fn new() -> Self {
        Self::default()
    }

    /// Set TTL in seconds
    pub fn with_ttl_secs(mut self, secs: u32) -> Self {
        self.ttl_secs = secs;
        self
    }

    /// Set TTL from a duration, saturating at `u32::MAX` seconds
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl_secs = u32::try_from(ttl.as_secs()).unwrap_or(u32::MAX);
        self
    }

    /// Add one tag
    pub fn with_tag<S: Into<String>>(mut self, tag: S) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Add several tags
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Whether the entry never expires
    pub fn is_persistent(&self) -> bool {
        self.ttl_secs == NO_EXPIRY
    }
}
