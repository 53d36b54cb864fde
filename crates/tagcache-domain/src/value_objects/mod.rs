//! Domain Value Objects
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`CacheOptions`] | Per-call TTL and tag list |
//! | [`CachedValue`] | A value read back from the store, parsed or raw |
//! | [`TagConsistency`] | How tag index appends are coordinated |
//! | [`GetOrSetMode`] | Whether concurrent `get_or_set` misses are coalesced |
//! | [`CacheStats`] | Hit/miss counters |

/// Decoded cache values
pub mod cached_value;
/// Consistency modes
pub mod consistency;
/// Per-call write options
pub mod options;
/// Operation statistics
pub mod stats;

pub use cached_value::CachedValue;
pub use consistency::{GetOrSetMode, TagConsistency};
pub use options::CacheOptions;
pub use stats::CacheStats;
