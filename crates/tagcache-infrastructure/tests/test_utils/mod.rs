//! Test utilities for tagcache-infrastructure tests
//!
//! Provides a real in-process store with switchable failures, so provider
//! behaviour can be checked against backend errors without a server.

pub mod flaky_store;

pub use flaky_store::*;
