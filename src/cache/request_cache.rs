//! Single-flight request cache.
//!
//! Two maps keyed by record key: resolved values and in-flight fetches.
//! A key is in at most one of them at a time. Concurrent callers for the
//! same key share one fetch; successes are memoized until invalidated,
//! failures are handed to every joined caller and then forgotten.
//!
//! The maps sit behind a `std::sync::Mutex` that is never held across an
//! `.await`. In-flight fetches are `futures::future::Shared` futures driven
//! by a spawned task, so a fetch runs to completion even if every caller
//! stops waiting for it.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::future::{BoxFuture, FutureExt, Shared};
use serde_json::Value;
use tracing::debug;

use crate::error::{FolioError, Result};

/// A resolved payload, shared by reference between every caller that asked for it.
pub type SharedValue = Arc<Value>;

type PendingFetch = Shared<BoxFuture<'static, Result<SharedValue>>>;

/// An in-flight fetch tagged with the generation it was registered under.
struct PendingEntry {
    generation: u64,
    fetch: PendingFetch,
}

#[derive(Default)]
struct Slots {
    entries: HashMap<String, SharedValue>,
    pending: HashMap<String, PendingEntry>,
    next_generation: u64,
    hits: u64,
    misses: u64,
    joins: u64,
}

/// Memoizing, de-duplicating cache for keyed async fetches.
#[derive(Clone, Default)]
pub struct RequestCache {
    slots: Arc<Mutex<Slots>>,
}

impl RequestCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `key`, invoking `fetch` only when the key is neither in flight nor cached.
    ///
    /// 1. In flight: wait on the existing fetch.
    /// 2. Cached: return the cached value.
    /// 3. Otherwise call `fetch()` exactly once, register it as in flight,
    ///    cache the value on success and drop the registration either way.
    ///
    /// `fetch` is called while the cache is locked and must only build its
    /// future, not touch this cache. Must be called within a Tokio runtime.
    pub async fn resolve<F, Fut>(&self, key: &str, fetch: F) -> Result<SharedValue>
    where
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<Value>> + Send + 'static,
    {
        if key.is_empty() {
            return Err(FolioError::Validation(
                "record key must not be empty".into(),
            ));
        }

        let in_flight = {
            let mut slots = self.lock();
            if let Some(pending) = slots.pending.get(key) {
                let fetch = pending.fetch.clone();
                slots.joins += 1;
                debug!(key, "Joining in-flight fetch");
                fetch
            } else if let Some(value) = slots.entries.get(key) {
                let value = Arc::clone(value);
                slots.hits += 1;
                debug!(key, "Cache hit");
                return Ok(value);
            } else {
                slots.misses += 1;
                slots.next_generation += 1;
                let generation = slots.next_generation;
                debug!(key, generation, "Cache miss, dispatching fetch");

                let settle_slots = Arc::clone(&self.slots);
                let owned_key = key.to_string();
                let fut = fetch();
                let shared = async move {
                    let outcome = fut.await.map(Arc::new);
                    settle(&settle_slots, &owned_key, generation, &outcome);
                    outcome
                }
                .boxed()
                .shared();

                slots.pending.insert(
                    key.to_string(),
                    PendingEntry {
                        generation,
                        fetch: shared.clone(),
                    },
                );
                tokio::spawn(shared.clone().map(|_| ()));
                shared
            }
        };

        in_flight.await
    }

    /// Drop the cached value and any in-flight registration for `key`,
    /// or for every key when `key` is `None`.
    ///
    /// Callers already waiting on a dropped fetch still receive its outcome,
    /// but that outcome is not cached.
    pub fn invalidate(&self, key: Option<&str>) {
        let mut slots = self.lock();
        match key {
            Some(key) => {
                let had_entry = slots.entries.remove(key).is_some();
                let had_pending = slots.pending.remove(key).is_some();
                debug!(key, had_entry, had_pending, "Invalidated cache key");
            }
            None => {
                let entries = slots.entries.len();
                let pending = slots.pending.len();
                slots.entries.clear();
                slots.pending.clear();
                debug!(entries, pending, "Cleared request cache");
            }
        }
    }

    /// Cached value for `key`, without fetching.
    pub fn peek(&self, key: &str) -> Option<SharedValue> {
        self.lock().entries.get(key).cloned()
    }

    /// Whether a fetch for `key` is currently in flight.
    pub fn is_pending(&self, key: &str) -> bool {
        self.lock().pending.contains_key(key)
    }

    /// Return aggregate statistics about the cache.
    pub fn stats(&self) -> CacheStats {
        let slots = self.lock();
        CacheStats {
            entries: slots.entries.len(),
            pending: slots.pending.len(),
            hits: slots.hits,
            misses: slots.misses,
            joins: slots.joins,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Slots> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Record the outcome of the fetch registered under `generation`.
///
/// A fetch whose registration was invalidated (or replaced) leaves the maps alone.
fn settle(slots: &Mutex<Slots>, key: &str, generation: u64, outcome: &Result<SharedValue>) {
    let mut slots = slots.lock().unwrap_or_else(PoisonError::into_inner);
    let current = slots
        .pending
        .get(key)
        .is_some_and(|p| p.generation == generation);
    if !current {
        debug!(key, generation, "Fetch settled after invalidation, discarding");
        return;
    }

    slots.pending.remove(key);
    match outcome {
        Ok(value) => {
            slots.entries.insert(key.to_string(), Arc::clone(value));
        }
        Err(e) => debug!(key, error = %e, "Fetch failed, not caching"),
    }
}

/// Aggregate cache statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    /// Keys with a cached value.
    pub entries: usize,
    /// Keys with a fetch in flight.
    pub pending: usize,
    /// Requests answered from a cached value.
    pub hits: u64,
    /// Requests that dispatched a new fetch.
    pub misses: u64,
    /// Requests that joined a fetch already in flight.
    pub joins: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::oneshot;

    fn counting(
        calls: &Arc<AtomicUsize>,
        value: Value,
    ) -> impl FnOnce() -> futures::future::Ready<Result<Value>> + Send {
        let calls = Arc::clone(calls);
        move || {
            calls.fetch_add(1, Ordering::SeqCst);
            futures::future::ready(Ok(value))
        }
    }

    #[tokio::test]
    async fn test_concurrent_callers_share_one_fetch() {
        let cache = RequestCache::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let (release_tx, release_rx) = oneshot::channel::<()>();

        let first_calls = Arc::clone(&calls);
        let first = cache.resolve("personal-info", move || {
            first_calls.fetch_add(1, Ordering::SeqCst);
            async move {
                let _ = release_rx.await;
                Ok(json!({"name": "Bo"}))
            }
        });
        let second = cache.resolve("personal-info", counting(&calls, json!("never")));
        let release = async {
            tokio::task::yield_now().await;
            let _ = release_tx.send(());
        };

        let (a, b, ()) = tokio::join!(first, second, release);
        let (a, b) = (a.unwrap(), b.unwrap());

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&a, &b), "joined callers get the same allocation");
        assert_eq!(*a, json!({"name": "Bo"}));

        let stats = cache.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.joins, 1);
        assert_eq!(stats.entries, 1);
        assert_eq!(stats.pending, 0);
    }

    #[tokio::test]
    async fn test_cached_value_wins_over_new_fetch() {
        let cache = RequestCache::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let first = cache
            .resolve("projects", counting(&calls, json!([1, 2, 3])))
            .await
            .unwrap();
        let second = cache
            .resolve("projects", counting(&calls, json!(["other"])))
            .await
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(*second, json!([1, 2, 3]));
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.stats().hits, 1);
    }

    #[tokio::test]
    async fn test_invalidate_key_forces_refetch() {
        let cache = RequestCache::new();
        let calls = Arc::new(AtomicUsize::new(0));

        cache.resolve("a", counting(&calls, json!(1))).await.unwrap();
        cache.resolve("b", counting(&calls, json!(2))).await.unwrap();
        cache.invalidate(Some("a"));

        let a = cache.resolve("a", counting(&calls, json!(10))).await.unwrap();
        let b = cache.resolve("b", counting(&calls, json!(20))).await.unwrap();

        assert_eq!(*a, json!(10));
        assert_eq!(*b, json!(2), "other keys stay cached");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_invalidate_all_forces_refetch_for_every_key() {
        let cache = RequestCache::new();
        let calls = Arc::new(AtomicUsize::new(0));

        for key in ["a", "b", "c"] {
            cache.resolve(key, counting(&calls, json!(key))).await.unwrap();
        }
        cache.invalidate(None);
        assert_eq!(cache.stats().entries, 0);

        for key in ["a", "b", "c"] {
            cache.resolve(key, counting(&calls, json!(key))).await.unwrap();
        }
        assert_eq!(calls.load(Ordering::SeqCst), 6);
    }

    #[tokio::test]
    async fn test_invalidate_absent_key_is_noop() {
        let cache = RequestCache::new();
        cache.invalidate(Some("missing"));
        cache.invalidate(None);
        assert_eq!(cache.stats(), CacheStats::default());
    }

    #[tokio::test]
    async fn test_failure_is_shared_and_not_cached() {
        let cache = RequestCache::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let (release_tx, release_rx) = oneshot::channel::<()>();

        let fail_calls = Arc::clone(&calls);
        let first = cache.resolve("education", move || {
            fail_calls.fetch_add(1, Ordering::SeqCst);
            async move {
                let _ = release_rx.await;
                Err(FolioError::Fixture("no fixture".into()))
            }
        });
        let second = cache.resolve("education", counting(&calls, json!("never")));
        let release = async {
            tokio::task::yield_now().await;
            let _ = release_tx.send(());
        };

        let (a, b, ()) = tokio::join!(first, second, release);
        assert_eq!(a.unwrap_err(), FolioError::Fixture("no fixture".into()));
        assert_eq!(b.unwrap_err(), FolioError::Fixture("no fixture".into()));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let stats = cache.stats();
        assert_eq!(stats.entries, 0);
        assert_eq!(stats.pending, 0);

        let retry = cache
            .resolve("education", counting(&calls, json!([])))
            .await
            .unwrap();
        assert_eq!(*retry, json!([]));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_invalidated_fetch_does_not_repopulate() {
        let cache = RequestCache::new();
        let (release_tx, release_rx) = oneshot::channel::<()>();

        let stale = cache.resolve("about-info", move || async move {
            let _ = release_rx.await;
            Ok(json!("zh"))
        });
        let invalidate = async {
            tokio::task::yield_now().await;
            assert!(cache.is_pending("about-info"));
            cache.invalidate(Some("about-info"));
            assert!(!cache.is_pending("about-info"));
            let _ = release_tx.send(());
        };

        let (stale, ()) = tokio::join!(stale, invalidate);
        assert_eq!(*stale.unwrap(), json!("zh"), "waiters still get the outcome");
        assert!(cache.peek("about-info").is_none(), "but it is not cached");

        let calls = Arc::new(AtomicUsize::new(0));
        let fresh = cache
            .resolve("about-info", counting(&calls, json!("en")))
            .await
            .unwrap();
        assert_eq!(*fresh, json!("en"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_stale_fetch_leaves_newer_registration_alone() {
        let cache = RequestCache::new();
        let (old_tx, old_rx) = oneshot::channel::<()>();
        let (new_tx, new_rx) = oneshot::channel::<()>();

        let old = cache.resolve("projects", move || async move {
            let _ = old_rx.await;
            Ok(json!("old"))
        });
        let newer = async {
            tokio::task::yield_now().await;
            cache.invalidate(None);
            let fut = cache.resolve("projects", move || async move {
                let _ = new_rx.await;
                Ok(json!("new"))
            });
            let drive = async {
                tokio::task::yield_now().await;
                let _ = old_tx.send(());
                // Let the old fetch settle while the new one is still pending.
                for _ in 0..8 {
                    tokio::task::yield_now().await;
                }
                assert!(cache.is_pending("projects"));
                let _ = new_tx.send(());
            };
            let (value, ()) = tokio::join!(fut, drive);
            value
        };

        let (old, newer) = tokio::join!(old, newer);
        assert_eq!(*old.unwrap(), json!("old"));
        assert_eq!(*newer.unwrap(), json!("new"));
        assert_eq!(*cache.peek("projects").unwrap(), json!("new"));
    }

    #[tokio::test]
    async fn test_empty_key_rejected() {
        let cache = RequestCache::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let err = cache.resolve("", counting(&calls, json!(1))).await.unwrap_err();
        assert!(matches!(err, FolioError::Validation(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_fetch_completes_when_caller_gives_up() {
        let cache = RequestCache::new();
        let (release_tx, release_rx) = oneshot::channel::<()>();

        let abandoned = cache.resolve("contact-info", move || async move {
            let _ = release_rx.await;
            Ok(json!("done"))
        });
        // Poll once so the fetch is registered, then drop the caller.
        assert!(futures::poll!(Box::pin(abandoned)).is_pending());
        assert!(cache.is_pending("contact-info"));

        release_tx.send(()).unwrap();
        for _ in 0..16 {
            if cache.peek("contact-info").is_some() {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert_eq!(*cache.peek("contact-info").unwrap(), json!("done"));
    }
}
