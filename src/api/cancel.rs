//! Request Cancellation
//!
//! A [`RequestScope`] owns the in-flight requests of one view. Cancelling the
//! scope aborts every request still pending; they resolve to
//! [`ApiError::Cancelled`] and their results are discarded.

use futures_util::future::{AbortHandle, Abortable};
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use super::error::{ApiError, ApiResult};

/// Set of cancellable requests belonging to one view
#[derive(Clone, Default)]
pub struct RequestScope {
    inner: Arc<ScopeInner>,
}

#[derive(Default)]
struct ScopeInner {
    next_id: AtomicU64,
    cancelled: AtomicBool,
    pending: Mutex<HashMap<u64, AbortHandle>>,
}

impl ScopeInner {
    fn pending(&self) -> MutexGuard<'_, HashMap<u64, AbortHandle>> {
        // A panic while holding the lock leaves the map itself intact
        self.pending.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn abort_all(&self) {
        for (_, handle) in self.pending().drain() {
            handle.abort();
        }
    }
}

impl RequestScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a request inside the scope.
    ///
    /// Returns [`ApiError::Cancelled`] if the scope is cancelled before or
    /// while the request runs.
    pub async fn run<F, T>(&self, request: F) -> ApiResult<T>
    where
        F: Future<Output = ApiResult<T>>,
    {
        let (handle, registration) = AbortHandle::new_pair();
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        {
            // Checked under the lock: `cancel_all` sets the flag before it
            // drains, so a request registered here is either drained or
            // refused
            let mut pending = self.inner.pending();
            if self.is_cancelled() {
                return Err(ApiError::Cancelled);
            }
            pending.insert(id, handle);
        }

        let outcome = Abortable::new(request, registration).await;
        self.inner.pending().remove(&id);

        match outcome {
            Ok(result) => result,
            Err(_aborted) => {
                tracing::debug!(request = id, "request aborted by scope");
                Err(ApiError::Cancelled)
            }
        }
    }

    /// Abort everything in flight; later calls to [`run`](Self::run) fail fast
    pub fn cancel_all(&self) {
        self.inner.cancelled.store(true, Ordering::SeqCst);
        self.inner.abort_all();
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    /// Number of requests currently awaiting a response
    pub fn in_flight(&self) -> usize {
        self.inner.pending().len()
    }
}

impl std::fmt::Debug for RequestScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestScope")
            .field("cancelled", &self.is_cancelled())
            .field("in_flight", &self.in_flight())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_completed_request_passes_through() {
        let scope = RequestScope::new();
        let result = scope.run(async { Ok::<_, ApiError>(42) }).await;
        assert_eq!(result, Ok(42));
        assert_eq!(scope.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_errors_pass_through() {
        let scope = RequestScope::new();
        let result: ApiResult<()> = scope
            .run(async { Err(ApiError::Network("refused".into())) })
            .await;
        assert_eq!(result, Err(ApiError::Network("refused".into())));
    }

    #[tokio::test]
    async fn test_cancel_aborts_pending_request() {
        let scope = RequestScope::new();
        let worker = scope.clone();

        let task = tokio::spawn(async move {
            worker
                .run(async {
                    tokio::time::sleep(Duration::from_secs(30)).await;
                    Ok::<_, ApiError>("late")
                })
                .await
        });

        while scope.in_flight() == 0 {
            tokio::task::yield_now().await;
        }
        scope.cancel_all();

        let result = task.await.unwrap();
        assert_eq!(result, Err(ApiError::Cancelled));
        assert_eq!(scope.in_flight(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_cancel_from_another_thread_reaches_every_request() {
        let scope = RequestScope::new();
        let tasks: Vec<_> = (0..64)
            .map(|_| {
                let worker = scope.clone();
                tokio::spawn(async move {
                    worker
                        .run(async {
                            tokio::time::sleep(Duration::from_secs(30)).await;
                            Ok::<_, ApiError>(())
                        })
                        .await
                })
            })
            .collect();

        let canceller = scope.clone();
        std::thread::spawn(move || canceller.cancel_all()).join().unwrap();

        for task in tasks {
            let result = tokio::time::timeout(Duration::from_secs(5), task)
                .await
                .expect("request outlived cancel_all")
                .unwrap();
            assert_eq!(result, Err(ApiError::Cancelled));
        }
        assert_eq!(scope.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_cancelled_scope_rejects_new_requests() {
        let scope = RequestScope::new();
        scope.cancel_all();

        let result = scope.run(async { Ok::<_, ApiError>(1) }).await;
        assert_eq!(result, Err(ApiError::Cancelled));
    }
}
