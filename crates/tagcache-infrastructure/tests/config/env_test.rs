//! Environment Override Tests
//!
//! These tests modify environment variables and must run sequentially:
//!
//! ```bash
//! cargo test -p tagcache-infrastructure --test integration env_test -- --test-threads=1 --ignored
//! ```
//!
//! # Safety
//!
//! Tests use `unsafe` blocks for `env::set_var`/`env::remove_var` because
//! Rust 2024 edition requires this for environment variable mutations.

use std::env;
use tagcache_domain::GetOrSetMode;
use tagcache_infrastructure::config::ConfigLoader;
use tempfile::TempDir;

fn set_env(key: &str, value: &str) {
    // SAFETY: Tests must run with --test-threads=1
    unsafe {
        env::set_var(key, value);
    }
}

fn remove_env(key: &str) {
    // SAFETY: Tests must run with --test-threads=1
    unsafe {
        env::remove_var(key);
    }
}

#[test]
#[ignore = "requires --test-threads=1 due to env var mutations"]
fn test_env_overrides_toml() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("tagcache.toml");
    std::fs::write(&path, "[cache]\nkey_prefix = \"file:\"\n").unwrap();

    set_env("TAGCACHE__CACHE__KEY_PREFIX", "env:");
    set_env("TAGCACHE__CACHE__GET_OR_SET", "single_flight");
    let config = ConfigLoader::new().with_config_path(&path).load();
    remove_env("TAGCACHE__CACHE__KEY_PREFIX");
    remove_env("TAGCACHE__CACHE__GET_OR_SET");

    let config = config.unwrap();
    assert_eq!(config.cache.key_prefix, "env:");
    assert_eq!(config.cache.get_or_set, GetOrSetMode::SingleFlight);
}

#[test]
#[ignore = "requires --test-threads=1 due to env var mutations"]
fn test_custom_env_prefix() {
    let temp_dir = TempDir::new().unwrap();

    set_env("MYAPP__CACHE__BACKEND", "moka");
    let config = ConfigLoader::new()
        .with_config_path(temp_dir.path().join("absent.toml"))
        .with_env_prefix("MYAPP")
        .load();
    remove_env("MYAPP__CACHE__BACKEND");

    assert_eq!(config.unwrap().cache.backend, "moka");
}
