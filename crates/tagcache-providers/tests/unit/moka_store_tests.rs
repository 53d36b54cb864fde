//! Moka Backing Store Tests

use std::time::Duration;
use tagcache_providers::BackingStore;
use tagcache_providers::store::MokaBackingStore;

#[tokio::test]
async fn test_moka_store_basic_operations() {
    let store = MokaBackingStore::new();

    store.set("cache:k", "{\"n\":1}", 0).await.unwrap();
    assert_eq!(
        store.get("cache:k").await.unwrap(),
        Some("{\"n\":1}".to_string())
    );

    assert!(store.delete("cache:k").await.unwrap());
    assert!(store.get("cache:k").await.unwrap().is_none());
}

#[tokio::test]
async fn test_moka_store_nonexistent_key() {
    let store = MokaBackingStore::new();

    assert!(store.get("missing").await.unwrap().is_none());
    assert!(!store.delete("missing").await.unwrap());
}

#[tokio::test]
async fn test_moka_store_overwrite() {
    let store = MokaBackingStore::new();

    store.set("k", "first", 0).await.unwrap();
    store.set("k", "second", 0).await.unwrap();
    assert_eq!(store.get("k").await.unwrap(), Some("second".to_string()));
}

#[tokio::test]
async fn test_moka_store_get_multi_returns_only_present_keys() {
    let store = MokaBackingStore::new();
    store.set("a", "1", 0).await.unwrap();
    store.set("c", "3", 0).await.unwrap();

    let keys = vec!["a".to_string(), "b".to_string(), "c".to_string()];
    let found = store.get_multi(&keys).await.unwrap();

    assert_eq!(found.len(), 2);
    assert_eq!(found.get("a"), Some(&"1".to_string()));
    assert_eq!(found.get("c"), Some(&"3".to_string()));
    assert!(!found.contains_key("b"));
}

#[tokio::test]
async fn test_moka_store_flush() {
    let store = MokaBackingStore::new();
    store.set("key1", "\"value1\"", 0).await.unwrap();
    store.set("key2", "\"value2\"", 0).await.unwrap();
    assert_eq!(store.entry_count().await, 2);

    store.flush().await.unwrap();

    assert_eq!(store.entry_count().await, 0);
    assert!(store.get("key1").await.unwrap().is_none());
}

#[tokio::test]
async fn test_moka_store_ttl_expires_entry() {
    let store = MokaBackingStore::new();
    store.set("short", "v", 1).await.unwrap();
    store.set("forever", "v", 0).await.unwrap();

    assert!(store.get("short").await.unwrap().is_some());
    tokio::time::sleep(Duration::from_millis(1500)).await;

    assert!(store.get("short").await.unwrap().is_none());
    assert!(store.get("forever").await.unwrap().is_some());
}

#[tokio::test]
async fn test_moka_store_overwrite_resets_ttl() {
    let store = MokaBackingStore::new();
    store.set("k", "v1", 1).await.unwrap();
    store.set("k", "v2", 0).await.unwrap();

    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert_eq!(store.get("k").await.unwrap(), Some("v2".to_string()));
}

#[tokio::test]
async fn test_moka_store_name_and_events() {
    let store = MokaBackingStore::with_capacity(10);
    assert_eq!(store.name(), "moka");
    assert_eq!(store.max_capacity(), 10);
    assert!(store.events().is_none());
    assert!(store.end().await.is_ok());
}
