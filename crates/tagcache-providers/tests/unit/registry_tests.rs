//! Backing Store Registry Tests

use tagcache_providers::registry::{BackingStoreConfig, list_backing_stores, resolve_backing_store};

#[test]
fn test_builtin_stores_are_registered() {
    let names: Vec<&str> = list_backing_stores().into_iter().map(|(n, _)| n).collect();
    assert!(names.contains(&"moka"));
    assert!(names.contains(&"null"));
}

#[tokio::test]
async fn test_resolve_moka_store() {
    let store = resolve_backing_store(BackingStoreConfig::new("moka").with_max_capacity(100))
        .await
        .unwrap();
    assert_eq!(store.name(), "moka");

    store.set("k", "v", 0).await.unwrap();
    assert_eq!(store.get("k").await.unwrap(), Some("v".to_string()));
}

#[tokio::test]
async fn test_resolve_unknown_store_lists_available() {
    let err = resolve_backing_store(BackingStoreConfig::new("does-not-exist"))
        .await
        .unwrap_err();
    let message = err.to_string();
    assert!(message.contains("does-not-exist"));
    assert!(message.contains("moka"));
}
