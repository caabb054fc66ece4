use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;

use crate::content::fallback::Fallback;
use crate::db::repository::Repository;
use crate::error::AppError;

/// How an [`EntityReader`] caches and guards its store reads.
#[derive(Debug, Clone)]
pub struct ReaderOptions {
    /// How long a successful listing stays cached. `None` keeps it until
    /// [`EntityReader::invalidate`] is called.
    pub cache_ttl: Option<Duration>,
    /// Upper bound for a single store call.
    pub store_timeout: Duration,
    /// Serve the static fallback list when the store fails.
    pub use_fallback: bool,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            cache_ttl: None,
            store_timeout: Duration::from_secs(3),
            use_fallback: true,
        }
    }
}

/// Run a store call with an upper time bound.
pub(crate) async fn bounded<F, R>(timeout: Duration, call: F) -> Result<R, AppError>
where
    F: Future<Output = Result<R, AppError>>,
{
    tokio::time::timeout(timeout, call)
        .await
        .map_err(|_| AppError::Timeout(timeout.as_millis() as u64))?
}

/// Fetches and caches the full listing of one content type.
///
/// Only successful store reads are cached. A failed read falls back to the
/// static records of `T` without caching them, so the next call retries the
/// store. Concurrent callers on a cold cache share one store read.
///
/// Listings are cached under the generation current when their read started.
/// [`invalidate`](Self::invalidate) moves to a new generation, so a read that
/// was already running when a write landed can never be served afterwards.
pub struct EntityReader<T: Fallback> {
    repo: Arc<dyn Repository<T>>,
    cache: Cache<u64, Arc<Vec<T>>>,
    generation: AtomicU64,
    options: ReaderOptions,
}

impl<T: Fallback> EntityReader<T> {
    pub fn new(repo: Arc<dyn Repository<T>>, options: ReaderOptions) -> Self {
        let mut builder = Cache::builder();
        if let Some(ttl) = options.cache_ttl {
            builder = builder.time_to_live(ttl);
        }

        Self {
            repo,
            cache: builder.build(),
            generation: AtomicU64::new(0),
            options,
        }
    }

    /// All records of `T` in listing order.
    ///
    /// Errors only when the store fails and fallback is disabled.
    pub async fn get_all(&self) -> Result<Arc<Vec<T>>, AppError> {
        let repo = Arc::clone(&self.repo);
        let timeout = self.options.store_timeout;
        let generation = self.generation.load(Ordering::SeqCst);

        let loaded = self
            .cache
            .try_get_with(generation, async move {
                let records = bounded(timeout, repo.list()).await?;
                tracing::debug!(
                    collection = T::COLLECTION,
                    count = records.len(),
                    generation,
                    "Loaded collection from store"
                );
                Ok::<_, AppError>(Arc::new(records))
            })
            .await;

        if self.generation.load(Ordering::SeqCst) != generation {
            // Written to while this read ran; keep the stale listing out of the cache
            self.cache.invalidate(&generation).await;
        }

        match loaded {
            Ok(records) => Ok(records),
            Err(err) if self.options.use_fallback => {
                tracing::warn!(
                    collection = T::COLLECTION,
                    error = %err,
                    "Store read failed, serving fallback records"
                );
                Ok(Arc::new(T::fallback()))
            }
            Err(err) => {
                tracing::error!(collection = T::COLLECTION, error = %err, "Store read failed");
                Err(unshare(err))
            }
        }
    }

    /// Drop the cached listing; the next read goes to the store.
    ///
    /// Reads still in flight keep their generation and are not served to
    /// later callers.
    pub async fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.cache.invalidate_all();
    }

    /// Whether a listing of the current generation is cached.
    pub fn is_cached(&self) -> bool {
        self.cache
            .contains_key(&self.generation.load(Ordering::SeqCst))
    }
}

/// Take the error out of the cache's shared wrapper.
///
/// Waiters on the same failed read share one error; all but the last get a
/// copy that keeps the status class of the original.
fn unshare(err: Arc<AppError>) -> AppError {
    Arc::try_unwrap(err).unwrap_or_else(|shared| match shared.as_ref() {
        AppError::Timeout(ms) => AppError::Timeout(*ms),
        AppError::Database(msg) => AppError::Database(msg.clone()),
        other => AppError::Internal(other.to_string()),
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::db::memory::InMemoryRepository;
    use crate::db::models::{FaqEntry, JobPosting, Service};
    use crate::db::repository::Entity;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Repository wrapper that counts `list` calls and can be switched to fail.
    pub(crate) struct FlakyRepo<T: Entity> {
        inner: InMemoryRepository<T>,
        pub(crate) calls: AtomicUsize,
        pub(crate) failing: std::sync::atomic::AtomicBool,
        delay: Option<Duration>,
    }

    impl<T: Entity> FlakyRepo<T> {
        pub(crate) fn new(records: Vec<T>) -> Self {
            Self {
                inner: InMemoryRepository::with_records(records),
                calls: AtomicUsize::new(0),
                failing: std::sync::atomic::AtomicBool::new(false),
                delay: None,
            }
        }

        pub(crate) fn failing() -> Self {
            let repo = Self::new(Vec::new());
            repo.set_failing(true);
            repo
        }

        pub(crate) fn slow(records: Vec<T>, delay: Duration) -> Self {
            Self {
                delay: Some(delay),
                ..Self::new(records)
            }
        }

        pub(crate) fn set_failing(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }

        pub(crate) fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl<T: Entity> Repository<T> for FlakyRepo<T> {
        async fn list(&self) -> Result<Vec<T>, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if self.failing.load(Ordering::SeqCst) {
                return Err(AppError::Database("connection refused".into()));
            }
            self.inner.list().await
        }

        async fn find_by_id(&self, id: &str) -> Result<Option<T>, AppError> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(AppError::Database("connection refused".into()));
            }
            self.inner.find_by_id(id).await
        }

        async fn insert(&self, record: T) -> Result<T, AppError> {
            self.inner.insert(record).await
        }

        async fn update(&self, id: &str, record: T) -> Result<Option<T>, AppError> {
            self.inner.update(id, record).await
        }

        async fn delete(&self, id: &str) -> Result<bool, AppError> {
            self.inner.delete(id).await
        }
    }

    fn sample_services() -> Vec<Service> {
        let mut services = Service::fallback();
        services.truncate(2);
        for s in services.iter_mut() {
            s.title = format!("Store {}", s.title);
        }
        services
    }

    #[tokio::test]
    async fn test_second_read_is_served_from_cache() {
        let repo = Arc::new(FlakyRepo::new(sample_services()));
        let reader = EntityReader::<Service>::new(repo.clone(), ReaderOptions::default());

        let first = reader.get_all().await.unwrap();
        let second = reader.get_all().await.unwrap();

        assert_eq!(repo.calls(), 1);
        assert_eq!(first, second);
        assert!(reader.is_cached());
    }

    #[tokio::test]
    async fn test_store_failure_serves_fallback_and_retries() {
        let repo = Arc::new(FlakyRepo::<JobPosting>::failing());
        let reader = EntityReader::<JobPosting>::new(repo.clone(), ReaderOptions::default());

        let first = reader.get_all().await.unwrap();
        let second = reader.get_all().await.unwrap();

        assert_eq!(*first, JobPosting::fallback());
        assert_eq!(first, second);
        // Fallback is not cached: every call goes back to the store
        assert_eq!(repo.calls(), 2);
        assert!(!reader.is_cached());
    }

    #[tokio::test]
    async fn test_recovers_after_outage() {
        let repo = Arc::new(FlakyRepo::new(sample_services()));
        repo.set_failing(true);
        let reader = EntityReader::<Service>::new(repo.clone(), ReaderOptions::default());

        assert_eq!(*reader.get_all().await.unwrap(), Service::fallback());

        repo.set_failing(false);
        let records = reader.get_all().await.unwrap();
        assert!(records.iter().all(|s| s.title.starts_with("Store ")));
    }

    #[tokio::test]
    async fn test_failure_propagates_without_fallback() {
        let repo = Arc::new(FlakyRepo::<FaqEntry>::failing());
        let options = ReaderOptions {
            use_fallback: false,
            ..ReaderOptions::default()
        };
        let reader = EntityReader::<FaqEntry>::new(repo, options);

        let result = reader.get_all().await;
        assert!(matches!(result, Err(AppError::Database(_))));
    }

    #[tokio::test]
    async fn test_slow_store_times_out_to_fallback() {
        let repo = Arc::new(FlakyRepo::slow(sample_services(), Duration::from_millis(200)));
        let options = ReaderOptions {
            store_timeout: Duration::from_millis(20),
            ..ReaderOptions::default()
        };
        let reader = EntityReader::<Service>::new(repo, options);

        let records = reader.get_all().await.unwrap();
        assert_eq!(*records, Service::fallback());
    }

    #[tokio::test]
    async fn test_concurrent_cold_reads_share_one_fetch() {
        let repo = Arc::new(FlakyRepo::slow(sample_services(), Duration::from_millis(50)));
        let reader = EntityReader::<Service>::new(repo.clone(), ReaderOptions::default());

        let (a, b, c) = tokio::join!(reader.get_all(), reader.get_all(), reader.get_all());
        assert!(a.is_ok() && b.is_ok() && c.is_ok());
        assert_eq!(repo.calls(), 1);
    }

    #[tokio::test]
    async fn test_invalidate_forces_reload() {
        let repo = Arc::new(FlakyRepo::new(sample_services()));
        let reader = EntityReader::<Service>::new(repo.clone(), ReaderOptions::default());

        reader.get_all().await.unwrap();
        reader.invalidate().await;
        reader.get_all().await.unwrap();

        assert_eq!(repo.calls(), 2);
    }

    #[tokio::test]
    async fn test_shared_failure_keeps_error_kind() {
        let repo = Arc::new(FlakyRepo::<FaqEntry>::slow(Vec::new(), Duration::from_millis(50)));
        repo.set_failing(true);
        let options = ReaderOptions {
            use_fallback: false,
            ..ReaderOptions::default()
        };
        let reader = EntityReader::<FaqEntry>::new(repo, options);

        let (a, b) = tokio::join!(reader.get_all(), reader.get_all());
        assert!(matches!(a, Err(AppError::Database(_))));
        assert!(matches!(b, Err(AppError::Database(_))));
    }

    #[tokio::test]
    async fn test_invalidate_moves_to_new_generation() {
        let repo = Arc::new(FlakyRepo::new(sample_services()));
        let reader = EntityReader::<Service>::new(repo, ReaderOptions::default());

        reader.get_all().await.unwrap();
        assert!(reader.is_cached());
        reader.invalidate().await;
        assert!(!reader.is_cached());
    }
}
