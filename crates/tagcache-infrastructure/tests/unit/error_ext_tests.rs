//! Error Extension Tests

use std::error::Error as _;
use tagcache_domain::error::Error;
use tagcache_infrastructure::error_ext::ErrorContext;

#[test]
fn test_io_context_keeps_source() {
    let failed: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        "missing",
    ));

    let err = failed.io_context("Failed to read tagcache.toml").unwrap_err();

    assert!(matches!(err, Error::Io { .. }));
    assert!(err.to_string().contains("Failed to read tagcache.toml: missing"));
    assert!(err.source().is_some());
}

#[test]
fn test_config_context_maps_to_configuration() {
    let failed: std::result::Result<u32, std::num::ParseIntError> = "abc".parse::<u32>();

    let err = failed.config_context("Invalid pool size").unwrap_err();

    assert!(matches!(err, Error::Configuration { .. }));
    assert!(err.to_string().starts_with("Configuration error: Invalid pool size"));
}

#[test]
fn test_ok_passes_through() {
    let ok: std::result::Result<u32, std::io::Error> = Ok(7);
    assert_eq!(ok.io_context("unused").unwrap(), 7);
}
