use crate::ports::outbound::PackageRegistry;
use crate::resolution::domain::{normalize_name, PackageRecord};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

const DEFAULT_TTL_SECS: u64 = 3600;

/// A cached lookup result. `record: None` is a cached negative
/// ("confirmed not found"), also subject to the TTL, which prevents
/// repeated failing lookups within a run.
#[derive(Debug, Clone)]
struct CacheEntry {
    record: Option<PackageRecord>,
    fetched_at: Instant,
}

/// CachingRegistry wraps a PackageRegistry and adds a TTL-bounded,
/// thread-safe memo of lookups by canonical name.
///
/// Decorator pattern, same as any other registry to its callers. The
/// cache must be consulted before every network call; concurrent
/// lookups for the same name are coalesced behind a per-name lock so
/// at most one fetch is in flight per canonical name.
pub struct CachingRegistry<R: PackageRegistry> {
    inner: R,
    ttl: Duration,
    cache: DashMap<String, CacheEntry>,
    in_flight: DashMap<String, Arc<Mutex<()>>>,
}

impl<R: PackageRegistry> CachingRegistry<R> {
    /// Wraps `inner` with the default 1 hour TTL.
    pub fn new(inner: R) -> Self {
        Self::with_ttl(inner, Duration::from_secs(DEFAULT_TTL_SECS))
    }

    /// Wraps `inner` with a caller-chosen TTL.
    pub fn with_ttl(inner: R, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            cache: DashMap::new(),
            in_flight: DashMap::new(),
        }
    }

    fn fresh_entry(&self, name: &str) -> Option<Option<PackageRecord>> {
        let entry = self.cache.get(name)?;
        if entry.fetched_at.elapsed() < self.ttl {
            Some(entry.record.clone())
        } else {
            None
        }
    }

    /// Returns the current cache size (for testing/monitoring)
    #[cfg(test)]
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

#[async_trait]
impl<R: PackageRegistry> PackageRegistry for CachingRegistry<R> {
    async fn lookup(&self, name: &str) -> Option<PackageRecord> {
        let name = normalize_name(name);
        if name.is_empty() {
            return None;
        }

        if let Some(cached) = self.fresh_entry(&name) {
            return cached;
        }

        // Coalesce: one fetch per name, waiters re-check the cache.
        let lock = self
            .in_flight
            .entry(name.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let _guard = lock.lock().await;

        if let Some(cached) = self.fresh_entry(&name) {
            return cached;
        }

        let record = self.inner.lookup(&name).await;
        self.cache.insert(
            name.clone(),
            CacheEntry {
                record: record.clone(),
                fetched_at: Instant::now(),
            },
        );

        drop(_guard);
        self.in_flight.remove(&name);

        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Mock registry that tracks call counts and knows one package.
    struct MockRegistry {
        call_count: AtomicUsize,
        known: Option<String>,
    }

    impl MockRegistry {
        fn knowing(name: &str) -> Self {
            Self {
                call_count: AtomicUsize::new(0),
                known: Some(name.to_string()),
            }
        }

        fn empty() -> Self {
            Self {
                call_count: AtomicUsize::new(0),
                known: None,
            }
        }

        fn calls(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PackageRegistry for MockRegistry {
        async fn lookup(&self, name: &str) -> Option<PackageRecord> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            match &self.known {
                Some(known) if known == name => {
                    Some(PackageRecord::new(name.to_string(), "1.0.0".to_string()))
                }
                _ => None,
            }
        }
    }

    #[tokio::test]
    async fn test_second_lookup_within_ttl_hits_cache() {
        let caching = CachingRegistry::new(MockRegistry::knowing("requests"));

        let first = caching.lookup("requests").await;
        assert!(first.is_some());
        assert_eq!(caching.inner.calls(), 1);

        let second = caching.lookup("requests").await;
        assert!(second.is_some());
        // At most one registry call per name within the TTL window.
        assert_eq!(caching.inner.calls(), 1);
        assert_eq!(caching.cache_size(), 1);
    }

    #[tokio::test]
    async fn test_negative_result_is_cached() {
        let caching = CachingRegistry::new(MockRegistry::empty());

        assert!(caching.lookup("no-such-pkg").await.is_none());
        assert!(caching.lookup("no-such-pkg").await.is_none());

        assert_eq!(caching.inner.calls(), 1);
        assert_eq!(caching.cache_size(), 1);
    }

    #[tokio::test]
    async fn test_expired_entry_is_refetched() {
        let caching = CachingRegistry::with_ttl(
            MockRegistry::knowing("requests"),
            Duration::from_millis(10),
        );

        caching.lookup("requests").await;
        tokio::time::sleep(Duration::from_millis(30)).await;
        caching.lookup("requests").await;

        assert_eq!(caching.inner.calls(), 2);
    }

    #[tokio::test]
    async fn test_lookup_normalizes_before_caching() {
        let caching = CachingRegistry::new(MockRegistry::knowing("flask-restful"));

        assert!(caching.lookup("Flask_RESTful").await.is_some());
        assert!(caching.lookup("flask-restful").await.is_some());

        // Both spellings share one cache entry.
        assert_eq!(caching.inner.calls(), 1);
        assert_eq!(caching.cache_size(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_lookups_for_same_name_are_coalesced() {
        let caching = Arc::new(CachingRegistry::new(MockRegistry::knowing("requests")));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let caching = Arc::clone(&caching);
            handles.push(tokio::spawn(
                async move { caching.lookup("requests").await },
            ));
        }
        for handle in handles {
            assert!(handle.await.unwrap().is_some());
        }

        assert_eq!(caching.inner.calls(), 1);
    }

    #[tokio::test]
    async fn test_empty_name_short_circuits() {
        let caching = CachingRegistry::new(MockRegistry::empty());
        assert!(caching.lookup("").await.is_none());
        assert_eq!(caching.inner.calls(), 0);
        assert_eq!(caching.cache_size(), 0);
    }
}
