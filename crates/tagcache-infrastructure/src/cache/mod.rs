//! Tag-indexed caching on top of a backing store
//!
//! Reads flow `CacheProvider -> KeyCodec -> BackingStore -> ValueCodec`.
//! Tagged writes additionally go through the [`TagIndex`], which keeps one
//! JSON list of fully-qualified keys per tag inside the same store.

mod events;
pub mod key_codec;
pub mod keyed_lock;
pub mod provider;
pub mod tag_index;
pub mod value_codec;

pub use key_codec::KeyCodec;
pub use keyed_lock::KeyedLocks;
pub use provider::{CacheProvider, CacheProviderSettings};
pub use tag_index::TagIndex;
pub use value_codec::ValueCodec;
