//! Infrastructure layer constants
//!
//! Domain constants (key layout, TTL sentinels) are in
//! `tagcache_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "tagcache.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "tagcache";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "TAGCACHE";

/// Separator between nested keys in environment variable names
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// CACHE CONSTANTS
// ============================================================================

/// Backing store used when none is configured
pub const DEFAULT_BACKEND: &str = "memcached";

/// Default connections per server
pub const DEFAULT_POOL_SIZE: u32 = 4;

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable holding a tracing filter directive
pub const LOG_FILTER_ENV: &str = "TAGCACHE_LOG";
