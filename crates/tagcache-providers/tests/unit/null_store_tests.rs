//! Null Backing Store Tests

use tagcache_providers::BackingStore;
use tagcache_providers::store::NullBackingStore;

#[tokio::test]
async fn test_null_store_never_stores() {
    let store = NullBackingStore::new();

    store.set("k", "v", 0).await.unwrap();
    assert!(store.get("k").await.unwrap().is_none());
    assert!(!store.delete("k").await.unwrap());
    assert!(
        store
            .get_multi(&["k".to_string()])
            .await
            .unwrap()
            .is_empty()
    );
    assert!(store.flush().await.is_ok());
    assert_eq!(store.name(), "null");
}
