//! Domain layer constants
//!
//! Values that define how keys and entries are laid out in the backing store.
//! Infrastructure defaults (config file names, env prefixes) live in
//! `tagcache_infrastructure::constants`.

// ============================================================================
// KEY LAYOUT CONSTANTS
// ============================================================================

/// Default prefix prepended to every caller key
pub const DEFAULT_KEY_PREFIX: &str = "cache:";

/// Marker placed between the provider prefix and a tag name to build the
/// reserved key holding that tag's key list
pub const TAG_KEY_MARKER: &str = "_tag:";

// ============================================================================
// EXPIRY CONSTANTS
// ============================================================================

/// TTL value meaning "never expires"
pub const NO_EXPIRY: u32 = 0;

/// Largest relative expiration memcached accepts (30 days); larger values are
/// interpreted by the server as absolute Unix timestamps
pub const MEMCACHED_MAX_RELATIVE_TTL_SECS: u32 = 60 * 60 * 24 * 30;

// ============================================================================
// BACKEND LIMITS
// ============================================================================

/// Maximum key length accepted by memcached
pub const MEMCACHED_MAX_KEY_LENGTH: usize = 250;

/// Capacity of the diagnostic event channel exposed by network stores
pub const STORE_EVENT_CHANNEL_CAPACITY: usize = 64;
