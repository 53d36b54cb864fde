//! Cache Tests
//!
//! Provider behaviour over in-process stores, including injected backend
//! failures.

mod concurrency_test;
