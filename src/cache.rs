//! Request-deduplication memo for RPC fetches.
//!
//! One memo instance is owned per resolver lifetime and passed in by handle —
//! there is no process-global cache. Entries are keyed by call identity
//! `(method, serialized params)`. For a given key at most one request is in
//! flight: a second resolution while one is pending attaches to the same
//! shared result, and a completed result is reused until invalidated.
//!
//! The underlying request runs as a spawned task, so dropping every waiting
//! caller does not cancel it (fire-and-forget teardown). Explicit
//! cancellation goes through the [`AbortFetch`] capability, which also
//! evicts the entry so the next resolve refetches.

use crate::rpc::{FetchError, FetchResult};
use futures::future::{BoxFuture, FutureExt, Shared};
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, Weak};
use std::task::{Context, Poll};
use tokio::sync::oneshot;
use tokio::task::AbortHandle;

type SharedFetch = Shared<BoxFuture<'static, FetchResult>>;

/// Call identity: method name plus the serialized parameter sequence.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    method: String,
    params: String,
}

impl CacheKey {
    pub fn new(method: &str, params: &[Value]) -> Self {
        Self {
            method: method.to_string(),
            params: serde_json::to_string(params).unwrap_or_else(|_| "[]".to_string()),
        }
    }

    pub fn method(&self) -> &str {
        &self.method
    }
}

struct CacheEntry {
    shared: SharedFetch,
    abort: AbortHandle,
}

/// Explicitly-scoped fetch memo. Interior mutability only; the lock is held
/// for map operations, never across an await.
#[derive(Default)]
pub struct FetchCache {
    entries: Mutex<HashMap<CacheKey, CacheEntry>>,
}

/// Cancellation capability for one in-flight fetch. Callers may ignore it;
/// invoking it aborts the spawned request and evicts the memo entry, so
/// attached waiters observe [`FetchError::Aborted`] and a later resolve
/// starts fresh.
#[derive(Clone)]
pub struct AbortFetch {
    handle: AbortHandle,
    cache: Weak<FetchCache>,
    key: CacheKey,
}

impl AbortFetch {
    pub fn abort(&self) {
        log::debug!("aborting fetch for {}", self.key.method);
        self.handle.abort();
        if let Some(cache) = self.cache.upgrade() {
            cache.invalidate(&self.key);
        }
    }
}

/// A pending or completed resolution. Awaiting it yields the verbatim
/// envelope or the transport failure; every handle for the same key sees the
/// same outcome.
pub struct Fetch {
    shared: SharedFetch,
    abort: AbortFetch,
}

impl Fetch {
    pub fn abort_handle(&self) -> AbortFetch {
        self.abort.clone()
    }
}

impl Future for Fetch {
    type Output = FetchResult;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.shared).poll(cx)
    }
}

impl FetchCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach to the pending or completed fetch for `key`, spawning `fetch`
    /// as a background task if no entry exists.
    pub fn get_or_spawn<F, Fut>(self: &Arc<Self>, key: CacheKey, fetch: F) -> Fetch
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = FetchResult> + Send + 'static,
    {
        let mut entries = self.entries.lock().expect("fetch cache lock");

        if let Some(entry) = entries.get(&key) {
            log::debug!("memo hit for {} {}", key.method, key.params);
            return Fetch {
                shared: entry.shared.clone(),
                abort: AbortFetch {
                    handle: entry.abort.clone(),
                    cache: Arc::downgrade(self),
                    key,
                },
            };
        }

        let fut = fetch();
        let (done_tx, done_rx) = oneshot::channel::<FetchResult>();
        let task = tokio::spawn(async move {
            let _ = done_tx.send(fut.await);
        });
        let handle = task.abort_handle();

        // A dropped sender means the task was aborted before sending.
        let shared = done_rx
            .map(|received| received.unwrap_or_else(|_| Err(FetchError::Aborted)))
            .boxed()
            .shared();

        entries.insert(
            key.clone(),
            CacheEntry {
                shared: shared.clone(),
                abort: handle.clone(),
            },
        );

        Fetch {
            shared,
            abort: AbortFetch {
                handle,
                cache: Arc::downgrade(self),
                key,
            },
        }
    }

    /// Drop the entry for `key`; the next resolve refetches. Does not abort
    /// an in-flight request — other callers may still be attached to it.
    pub fn invalidate(&self, key: &CacheKey) -> bool {
        self.entries
            .lock()
            .expect("fetch cache lock")
            .remove(key)
            .is_some()
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.entries.lock().expect("fetch cache lock").clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().expect("fetch cache lock").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::RpcEnvelope;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn key(id: &str) -> CacheKey {
        CacheKey::new("getblock", &[Value::String(id.to_string())])
    }

    fn ok_envelope() -> FetchResult {
        Ok(RpcEnvelope::default())
    }

    #[tokio::test]
    async fn same_key_attaches_to_one_fetch() {
        let cache = Arc::new(FetchCache::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let spawn = |cache: &Arc<FetchCache>| {
            let calls = calls.clone();
            cache.get_or_spawn(key("100"), move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                ok_envelope()
            })
        };

        let first = spawn(&cache);
        let second = spawn(&cache);
        let (a, b) = tokio::join!(first, second);
        assert!(a.is_ok() && b.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // Completed result is reused as well.
        let third = spawn(&cache).await;
        assert!(third.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn distinct_keys_fetch_independently() {
        let cache = Arc::new(FetchCache::new());
        let calls = Arc::new(AtomicUsize::new(0));

        for id in ["100", "101"] {
            let calls = calls.clone();
            cache
                .get_or_spawn(key(id), move || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    ok_envelope()
                })
                .await
                .unwrap();
        }
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.len(), 2);
    }

    #[tokio::test]
    async fn invalidate_forces_refetch() {
        let cache = Arc::new(FetchCache::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let spawn = |cache: &Arc<FetchCache>| {
            let calls = calls.clone();
            cache.get_or_spawn(key("100"), move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                ok_envelope()
            })
        };

        spawn(&cache).await.unwrap();
        assert!(cache.invalidate(&key("100")));
        spawn(&cache).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn abort_yields_aborted_and_evicts() {
        let cache = Arc::new(FetchCache::new());
        let (started_tx, started_rx) = oneshot::channel::<()>();

        let slow = cache.get_or_spawn(key("100"), move || async move {
            let _ = started_tx.send(());
            tokio::time::sleep(std::time::Duration::from_secs(30)).await;
            ok_envelope()
        });

        started_rx.await.expect("fetch started");
        slow.abort_handle().abort();
        assert_eq!(slow.await, Err(FetchError::Aborted));
        assert!(cache.is_empty());

        // Next resolve starts fresh instead of replaying the abort.
        let calls = Arc::new(AtomicUsize::new(0));
        let counted = calls.clone();
        let retry = cache.get_or_spawn(key("100"), move || async move {
            counted.fetch_add(1, Ordering::SeqCst);
            ok_envelope()
        });
        assert!(retry.await.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn dropped_waiters_do_not_cancel_the_task() {
        let cache = Arc::new(FetchCache::new());
        let (started_tx, started_rx) = oneshot::channel::<()>();
        let (release_tx, release_rx) = oneshot::channel::<()>();

        let fetch = cache.get_or_spawn(key("100"), move || async move {
            let _ = started_tx.send(());
            let _ = release_rx.await;
            ok_envelope()
        });
        drop(fetch);

        // The spawned task keeps running without any waiter attached.
        started_rx.await.expect("task started");
        let _ = release_tx.send(());

        // Re-attaching observes the same entry's eventual result.
        let again = cache.get_or_spawn(key("100"), || async { ok_envelope() });
        assert!(again.await.is_ok());
        assert_eq!(cache.len(), 1);
    }
}
