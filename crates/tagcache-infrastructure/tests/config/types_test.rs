//! Configuration Type Tests

use std::time::Duration;
use tagcache_domain::TagConsistency;
use tagcache_infrastructure::config::{CacheConfig, ServerList};

#[test]
fn test_server_list_splits_commas() {
    let one = ServerList::One("a:1,b:2 , ,c:3".to_string());
    assert_eq!(one.to_vec(), vec!["a:1", "b:2", "c:3"]);

    let many = ServerList::Many(vec!["a:1".to_string(), "b:2,c:3".to_string()]);
    assert_eq!(many.to_vec(), vec!["a:1", "b:2", "c:3"]);
}

#[test]
fn test_resolved_servers_precedence() {
    let mut config = CacheConfig::default();
    assert!(config.resolved_servers().is_empty());

    config.port = Some(11311);
    assert_eq!(config.resolved_servers(), vec!["localhost:11311"]);

    config.host = Some("mc.internal".to_string());
    assert_eq!(config.resolved_servers(), vec!["mc.internal:11311"]);

    config.servers = Some(ServerList::One("x:1".to_string()));
    assert_eq!(config.resolved_servers(), vec!["x:1"]);
}

#[test]
fn test_store_config_carries_tuning() {
    let mut config = CacheConfig::default();
    config.backend = "moka".to_string();
    config.options.read_timeout_ms = Some(100);
    config.options.max_capacity = Some(500);

    let store = config.store_config();
    assert_eq!(store.backend, "moka");
    assert_eq!(store.read_timeout, Some(Duration::from_millis(100)));
    assert_eq!(store.write_timeout, None);
    assert_eq!(store.max_capacity, Some(500));
}

#[test]
fn test_provider_settings_follow_config() {
    let mut config = CacheConfig::default();
    config.key_prefix = "svc:".to_string();
    config.tag_consistency = TagConsistency::Serialized;

    let settings = config.provider_settings();
    assert_eq!(settings.key_prefix, "svc:");
    assert_eq!(settings.tag_consistency, TagConsistency::Serialized);
}
