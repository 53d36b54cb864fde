//! Configuration Tests

mod env_test;
mod types_test;
