//! Provider-specific constants

/// Default Memcached server address
pub const MEMCACHED_DEFAULT_SERVER: &str = "localhost:11211";

/// Default Redis server address
pub const REDIS_DEFAULT_SERVER: &str = "localhost:6379";

/// Default number of pooled connections per Memcached server
pub const MEMCACHED_DEFAULT_POOL_SIZE: u32 = 4;

/// Default entry capacity of the in-process store
pub const MOKA_DEFAULT_MAX_CAPACITY: u64 = 100_000;
