//! Consistency modes for the two read-modify-write paths of the cache

use serde::{Deserialize, Serialize};

/// How appends to a tag's key list are coordinated
///
/// Appending is read-then-write. Under `BestEffort` two writers tagging
/// different keys with the same tag can interleave so that one key drops out
/// of the index; it stays cached but `invalidate_tag` no longer reaches it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagConsistency {
    /// No coordination; lost index updates are possible
    #[default]
    BestEffort,
    /// Appends and invalidations of one tag run one at a time within this
    /// process. Separate processes sharing a backend can still race.
    Serialized,
}

/// How concurrent `get_or_set` misses on one key are handled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GetOrSetMode {
    /// Every caller that observes a miss runs its own factory
    #[default]
    Independent,
    /// Concurrent misses in this process are collapsed into one factory run
    SingleFlight,
}
