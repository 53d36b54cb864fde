//! # tagcache domain layer
//!
//! Core types shared by every tagcache crate. Nothing in here performs I/O:
//! the [`ports::BackingStore`] trait is the boundary that providers implement.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | Error enum and `Result` alias |
//! | [`constants`] | Key prefixes, TTL sentinels, memcached limits |
//! | [`ports`] | `BackingStore` contract and its diagnostic events |
//! | [`value_objects`] | Per-call options, decoded values, consistency modes, stats |

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
pub use ports::{BackingStore, StoreEvent};
pub use value_objects::{CacheOptions, CacheStats, CachedValue, GetOrSetMode, TagConsistency};
