//! Redis Backing Store Tests
//!
//! Need a Redis server on `localhost:6379`:
//!
//! ```bash
//! cargo test -p tagcache-providers --features store-redis --test unit redis -- --ignored
//! ```

use tagcache_domain::error::Error;
use tagcache_providers::BackingStore;
use tagcache_providers::store::RedisBackingStore;

#[tokio::test]
#[ignore = "requires a running Redis server"]
async fn test_redis_round_trip() {
    let store = RedisBackingStore::connect("localhost:6379").await.unwrap();
    assert_eq!(store.server_address(), "redis://localhost:6379");

    store.set("tagcache-test:k", "v", 60).await.unwrap();
    store.set("tagcache-test:forever", "w", 0).await.unwrap();

    let found = store
        .get_multi(&[
            "tagcache-test:k".to_string(),
            "tagcache-test:absent".to_string(),
            "tagcache-test:forever".to_string(),
        ])
        .await
        .unwrap();
    assert_eq!(found.len(), 2);
    assert_eq!(found["tagcache-test:forever"], "w");

    assert!(store.delete("tagcache-test:k").await.unwrap());
    assert!(store.delete("tagcache-test:forever").await.unwrap());
    assert!(store.get("tagcache-test:k").await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires a running Redis server"]
async fn test_redis_commands_fail_after_end() {
    let store = RedisBackingStore::connect("redis://localhost:6379").await.unwrap();
    store.end().await.unwrap();

    assert!(matches!(store.get("tagcache-test:k").await, Err(Error::Closed)));
}
