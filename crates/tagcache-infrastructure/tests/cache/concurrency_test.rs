//! Concurrency Tests
//!
//! Behaviour of the opt-in coordination modes under concurrent callers.

use crate::test_utils::flaky_provider_with;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tagcache_domain::{CacheOptions, GetOrSetMode, TagConsistency};
use tagcache_infrastructure::cache::CacheProviderSettings;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_single_flight_runs_factory_once() {
    let (cache, _) = flaky_provider_with(
        CacheProviderSettings::default().with_get_or_set(GetOrSetMode::SingleFlight),
    );
    let cache = Arc::new(cache);
    let calls = Arc::new(AtomicUsize::new(0));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let cache = Arc::clone(&cache);
        let calls = Arc::clone(&calls);
        handles.push(tokio::spawn(async move {
            cache
                .get_or_set(
                    "expensive",
                    || async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_millis(50)).await;
                        Ok::<_, std::io::Error>(99u32)
                    },
                    &CacheOptions::default(),
                )
                .await
                .unwrap()
        }));
    }

    for handle in handles {
        assert_eq!(handle.await.unwrap(), 99);
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_serialized_tags_keep_every_key() {
    let (cache, _) = flaky_provider_with(
        CacheProviderSettings::default().with_tag_consistency(TagConsistency::Serialized),
    );
    let cache = Arc::new(cache);
    let opts = CacheOptions::default().with_tag("shared");

    let mut handles = Vec::new();
    for i in 0..16 {
        let cache = Arc::clone(&cache);
        let opts = opts.clone();
        handles.push(tokio::spawn(async move {
            cache.set(&format!("item:{i}"), &i, &opts).await.unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let mut listed = cache.tag_index().keys_for_tag("shared").await;
    listed.sort();
    assert_eq!(listed.len(), 16);

    cache.invalidate_tag("shared").await.unwrap();
    for i in 0..16 {
        assert!(!cache.has(&format!("item:{i}")).await.unwrap());
    }
}
