//! Domain Port Interfaces
//!
//! Boundary contracts between the cache layer and the key-value service it
//! sits on. Providers implement these; the infrastructure layer consumes them.

/// Backing store port
pub mod backing_store;

pub use backing_store::{BackingStore, StoreEvent};
