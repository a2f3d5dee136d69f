use lwc_preview_types::AuraConfig;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Single-slot holder for the scraped Aura config.
///
/// Filled at most once per instance and never cleared. There is no TTL: a
/// stale `fwuid`/token after an org-side deploy is only fixed by a restart.
#[derive(Debug, Default)]
pub struct ConfigCache {
    slot: OnceCell<Arc<AuraConfig>>,
}

impl ConfigCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<Arc<AuraConfig>> {
        self.slot.get().cloned()
    }

    /// Store `config` unless a value is already present. Returns whether it was stored.
    pub fn set_if_empty(&self, config: AuraConfig) -> bool {
        self.slot.set(Arc::new(config)).is_ok()
    }

    /// Return the cached config or run `factory` to produce it.
    ///
    /// Concurrent callers on an empty cache wait for a single in-flight
    /// factory. A failed factory leaves the slot empty so the next call retries.
    pub async fn get_or_try_init<F, Fut, E>(&self, factory: F) -> Result<Arc<AuraConfig>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<AuraConfig, E>>,
    {
        self.slot
            .get_or_try_init(|| async { factory().await.map(Arc::new) })
            .await
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lwc_preview_types::AuraContext;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn config(token: &str) -> AuraConfig {
        AuraConfig { token: token.to_string(), context: AuraContext::default() }
    }

    #[test]
    fn test_set_if_empty_first_writer_wins() {
        let cache = ConfigCache::new();
        assert!(cache.get().is_none());
        assert!(cache.set_if_empty(config("first")));
        assert!(!cache.set_if_empty(config("second")));
        assert_eq!(cache.get().unwrap().token, "first");
    }

    #[tokio::test]
    async fn test_factory_runs_once_after_success() {
        let cache = ConfigCache::new();
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let got = cache
                .get_or_try_init(|| async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, String>(config("tok"))
                })
                .await
                .unwrap();
            assert_eq!(got.token, "tok");
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failure_is_not_cached() {
        let cache = ConfigCache::new();

        let err = cache.get_or_try_init(|| async { Err::<AuraConfig, _>("down") }).await.unwrap_err();
        assert_eq!(err, "down");
        assert!(cache.get().is_none());

        let got = cache.get_or_try_init(|| async { Ok::<_, &str>(config("later")) }).await.unwrap();
        assert_eq!(got.token, "later");
    }

    #[tokio::test]
    async fn test_concurrent_callers_share_one_factory() {
        let cache = Arc::new(ConfigCache::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let calls = Arc::clone(&calls);
                tokio::spawn(async move {
                    cache
                        .get_or_try_init(|| async {
                            calls.fetch_add(1, Ordering::SeqCst);
                            tokio::time::sleep(Duration::from_millis(20)).await;
                            Ok::<_, String>(config("shared"))
                        })
                        .await
                })
            })
            .collect();

        for task in tasks {
            assert_eq!(task.await.unwrap().unwrap().token, "shared");
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
