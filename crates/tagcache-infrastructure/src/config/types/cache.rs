//! Cache configuration types

use crate::cache::CacheProviderSettings;
use crate::constants::{DEFAULT_BACKEND, DEFAULT_POOL_SIZE};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tagcache_domain::constants::DEFAULT_KEY_PREFIX;
use tagcache_domain::value_objects::{GetOrSetMode, TagConsistency};
use tagcache_providers::registry::BackingStoreConfig;

/// One server string or a list of them
///
/// A single string may hold several comma-separated addresses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ServerList {
    /// `"host1:11211,host2:11211"`
    One(String),
    /// `["host1:11211", "host2:11211"]`
    Many(Vec<String>),
}

impl ServerList {
    /// Flatten into individual, trimmed, non-empty addresses
    pub fn to_vec(&self) -> Vec<String> {
        let split = |s: &str| {
            s.split(',')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>()
        };
        match self {
            Self::One(servers) => split(servers),
            Self::Many(servers) => servers.iter().flat_map(|s| split(s)).collect(),
        }
    }
}

/// Backend tuning passed through to the backing store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendTuningOptions {
    /// Connections kept per server
    pub pool_size: u32,
    /// Socket read timeout in milliseconds
    pub read_timeout_ms: Option<u64>,
    /// Socket write timeout in milliseconds
    pub write_timeout_ms: Option<u64>,
    /// Entry capacity of in-process stores
    pub max_capacity: Option<u64>,
}

impl Default for BackendTuningOptions {
    fn default() -> Self {
        Self {
            pool_size: DEFAULT_POOL_SIZE,
            read_timeout_ms: None,
            write_timeout_ms: None,
            max_capacity: None,
        }
    }
}

/// Cache configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Registered backing store name ("memcached", "redis", "moka", "null")
    pub backend: String,

    /// Server addresses; takes precedence over `host`/`port`
    pub servers: Option<ServerList>,

    /// Single server host
    pub host: Option<String>,

    /// Single server port
    pub port: Option<u16>,

    /// Prefix prepended to every caller key
    pub key_prefix: String,

    /// Backend tuning
    pub options: BackendTuningOptions,

    /// Coordination of tag index appends
    pub tag_consistency: TagConsistency,

    /// Handling of concurrent `get_or_set` misses
    pub get_or_set: GetOrSetMode,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: DEFAULT_BACKEND.to_string(),
            servers: None,
            host: None,
            port: None,
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
            options: BackendTuningOptions::default(),
            tag_consistency: TagConsistency::default(),
            get_or_set: GetOrSetMode::default(),
        }
    }
}

impl CacheConfig {
    /// Server addresses to connect to
    ///
    /// `servers` wins; otherwise `host` and `port` form one address, with
    /// `localhost` standing in for a missing host. An empty result means the
    /// store's default server.
    pub fn resolved_servers(&self) -> Vec<String> {
        if let Some(servers) = &self.servers {
            return servers.to_vec();
        }
        match (&self.host, self.port) {
            (Some(host), Some(port)) => vec![format!("{host}:{port}")],
            (Some(host), None) => vec![host.clone()],
            (None, Some(port)) => vec![format!("localhost:{port}")],
            (None, None) => Vec::new(),
        }
    }

    /// Options for resolving the backing store from the registry
    pub fn store_config(&self) -> BackingStoreConfig {
        BackingStoreConfig {
            backend: self.backend.clone(),
            servers: self.resolved_servers(),
            pool_size: Some(self.options.pool_size),
            read_timeout: self.options.read_timeout_ms.map(Duration::from_millis),
            write_timeout: self.options.write_timeout_ms.map(Duration::from_millis),
            max_capacity: self.options.max_capacity,
        }
    }

    /// Settings for the cache provider itself
    pub fn provider_settings(&self) -> CacheProviderSettings {
        CacheProviderSettings {
            key_prefix: self.key_prefix.clone(),
            tag_consistency: self.tag_consistency,
            get_or_set: self.get_or_set,
        }
    }
}
