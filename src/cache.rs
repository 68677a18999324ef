use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;

/// Single value recomputed lazily once its refresh budget has elapsed.
///
/// Concurrent callers that find the value stale share a single loader run.
/// Failed loads are not cached.
pub struct Memoized<T> {
    slot: Cache<(), Arc<T>>,
}

impl<T> Memoized<T>
where
    T: Send + Sync + 'static,
{
    pub fn new(refresh_after: Duration) -> Self {
        assert!(
            refresh_after >= Duration::from_secs(1),
            "Refresh interval below one second"
        );
        Self::with_ttl(refresh_after)
    }

    pub async fn get_or_load<F, Fut, E>(&self, loader: F) -> Result<Arc<T>, Arc<E>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Send + Sync + 'static,
    {
        self.slot
            .try_get_with((), async move { loader().await.map(Arc::new) })
            .await
    }

    fn with_ttl(ttl: Duration) -> Self {
        let slot = Cache::builder().max_capacity(1).time_to_live(ttl).build();
        Self { slot }
    }
}
