//! Tests for domain value objects

use serde_json::json;
use std::time::Duration;
use tagcache_domain::{CacheOptions, CacheStats, CachedValue, GetOrSetMode, TagConsistency};

#[test]
fn test_cache_options_default_is_persistent_and_untagged() {
    let opts = CacheOptions::default();
    assert_eq!(opts.ttl_secs, 0);
    assert!(opts.is_persistent());
    assert!(opts.tags.is_empty());
}

#[test]
fn test_cache_options_builder() {
    let opts = CacheOptions::new()
        .with_ttl(Duration::from_secs(90))
        .with_tag("users")
        .with_tags(["team:1", "team:2"]);

    assert_eq!(opts.ttl_secs, 90);
    assert!(!opts.is_persistent());
    assert_eq!(opts.tags, vec!["users", "team:1", "team:2"]);
}

#[test]
fn test_cache_options_ttl_saturates() {
    let opts = CacheOptions::new().with_ttl(Duration::from_secs(u64::MAX));
    assert_eq!(opts.ttl_secs, u32::MAX);
}

#[test]
fn test_cache_options_deserialize_with_missing_fields() {
    let opts: CacheOptions = serde_json::from_value(json!({ "tags": ["a"] })).unwrap();
    assert_eq!(opts.ttl_secs, 0);
    assert_eq!(opts.tags, vec!["a"]);
}

#[test]
fn test_cached_value_accessors() {
    let parsed = CachedValue::Json(json!({ "id": 7 }));
    assert!(!parsed.is_raw());
    assert_eq!(parsed.as_json(), Some(&json!({ "id": 7 })));
    assert!(parsed.as_raw().is_none());

    let raw = CachedValue::Raw("plain text".to_string());
    assert!(raw.is_raw());
    assert_eq!(raw.as_raw(), Some("plain text"));
    assert_eq!(raw.into_json(), json!("plain text"));
}

#[test]
fn test_consistency_modes_default_to_observed_behaviour() {
    assert_eq!(TagConsistency::default(), TagConsistency::BestEffort);
    assert_eq!(GetOrSetMode::default(), GetOrSetMode::Independent);
}

#[test]
fn test_consistency_modes_snake_case() {
    let mode: TagConsistency = serde_json::from_value(json!("serialized")).unwrap();
    assert_eq!(mode, TagConsistency::Serialized);
    let mode: GetOrSetMode = serde_json::from_value(json!("single_flight")).unwrap();
    assert_eq!(mode, GetOrSetMode::SingleFlight);
}

#[test]
fn test_stats_hit_rate() {
    assert!(CacheStats::default().hit_rate().abs() < f64::EPSILON);

    let stats = CacheStats {
        hits: 1,
        misses: 3,
        ..Default::default()
    };
    assert!((stats.hit_rate() - 0.25).abs() < f64::EPSILON);
}
