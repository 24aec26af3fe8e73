use async_trait::async_trait;
use lariat_core::{
    Repository, ShortCode, ShortenParams, Shortener, ShortenerError, StorageError, UrlMapping,
    UrlRecord,
};
use lariat_generator::Generator;
use std::sync::Arc;
use tracing::{debug, info, warn};
use typed_builder::TypedBuilder;

/// Tunables for the shorten and listing workflows.
#[derive(Debug, Clone, TypedBuilder)]
pub struct ShortenerSettings {
    /// How many candidate codes to try before giving up with
    /// `ExhaustedRetries`. Collisions are transient, so a handful of
    /// attempts is enough unless the code space is nearly saturated.
    #[builder(default = 5)]
    pub max_attempts: u32,
    /// Upper bound on listing result size.
    #[builder(default = 100)]
    pub page_limit: usize,
}

impl Default for ShortenerSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// A concrete implementation of the `Shortener` trait.
///
/// Wraps an injected `Repository` and `Generator` and handles:
/// - input validation
/// - candidate code generation with bounded collision retry
/// - code resolution and tag-filtered listing
///
/// Each retry attempt is an independent atomic store insert; no lock is
/// held across the loop.
#[derive(Debug, Clone)]
pub struct ShortenerService<R, G> {
    repository: Arc<R>,
    generator: Arc<G>,
    settings: ShortenerSettings,
}

impl<R: Repository, G: Generator> ShortenerService<R, G> {
    /// Creates a new service with default settings.
    pub fn new(repository: R, generator: G) -> Self {
        Self::with_settings(repository, generator, ShortenerSettings::default())
    }

    /// Creates a new service with explicit settings.
    pub fn with_settings(repository: R, generator: G, settings: ShortenerSettings) -> Self {
        Self {
            repository: Arc::new(repository),
            generator: Arc::new(generator),
            settings,
        }
    }

    fn validate(params: &ShortenParams) -> Result<(), ShortenerError> {
        if params.original_url.trim().is_empty() {
            return Err(ShortenerError::InvalidInput(
                "original_url must be a non-empty string".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl<R: Repository, G: Generator> Shortener for ShortenerService<R, G> {
    async fn shorten(&self, params: ShortenParams) -> Result<ShortCode, ShortenerError> {
        Self::validate(&params)?;

        let record = UrlRecord {
            original_url: params.original_url,
            tag: params.tag,
        };

        for attempt in 1..=self.settings.max_attempts {
            let code = self.generator.generate();

            match self.repository.insert(&code, record.clone()).await {
                Ok(()) => {
                    info!(code = %code, url = %record.original_url, "shortened URL");
                    return Ok(code);
                }
                Err(StorageError::Conflict(_)) => {
                    debug!(code = %code, attempt, "candidate code collided, retrying");
                }
                Err(err) => return Err(err.into()),
            }
        }

        warn!(
            attempts = self.settings.max_attempts,
            "ran out of candidate codes"
        );
        Err(ShortenerError::ExhaustedRetries {
            attempts: self.settings.max_attempts,
        })
    }

    async fn resolve(&self, code: &ShortCode) -> Result<Option<UrlRecord>, ShortenerError> {
        match self.repository.get(code).await? {
            Some(record) => {
                debug!(code = %code, url = %record.original_url, "resolved short code");
                Ok(Some(record))
            }
            None => {
                debug!(code = %code, "short code not found");
                Ok(None)
            }
        }
    }

    async fn list(&self, tag_filter: Option<&str>) -> Result<Vec<UrlMapping>, ShortenerError> {
        let mappings = self
            .repository
            .list(tag_filter, self.settings.page_limit)
            .await?;
        Ok(mappings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lariat_core::error::Result as StorageResult;
    use lariat_core::ReadRepository;
    use lariat_generator::{RandomGenerator, SeqGenerator};
    use lariat_storage::InMemoryRepository;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// A store double that rejects the first `conflicts` inserts with
    /// `Conflict` before delegating to a real in-memory store.
    struct CollidingRepository {
        inner: InMemoryRepository,
        remaining: AtomicU32,
    }

    impl CollidingRepository {
        fn new(conflicts: u32) -> Self {
            Self {
                inner: InMemoryRepository::new(),
                remaining: AtomicU32::new(conflicts),
            }
        }
    }

    #[async_trait]
    impl ReadRepository for CollidingRepository {
        async fn get(&self, code: &ShortCode) -> StorageResult<Option<UrlRecord>> {
            self.inner.get(code).await
        }

        async fn list(
            &self,
            tag_filter: Option<&str>,
            limit: usize,
        ) -> StorageResult<Vec<UrlMapping>> {
            self.inner.list(tag_filter, limit).await
        }
    }

    #[async_trait]
    impl Repository for CollidingRepository {
        async fn insert(&self, code: &ShortCode, record: UrlRecord) -> StorageResult<()> {
            let remaining = self.remaining.load(Ordering::SeqCst);
            if remaining > 0 {
                self.remaining.store(remaining - 1, Ordering::SeqCst);
                return Err(StorageError::Conflict(code.to_string()));
            }
            self.inner.insert(code, record).await
        }
    }

    /// A store double whose inserts always fail with a given error.
    struct FailingRepository {
        error: StorageError,
    }

    #[async_trait]
    impl ReadRepository for FailingRepository {
        async fn get(&self, _code: &ShortCode) -> StorageResult<Option<UrlRecord>> {
            Ok(None)
        }

        async fn list(
            &self,
            _tag_filter: Option<&str>,
            _limit: usize,
        ) -> StorageResult<Vec<UrlMapping>> {
            Ok(vec![])
        }
    }

    #[async_trait]
    impl Repository for FailingRepository {
        async fn insert(&self, _code: &ShortCode, _record: UrlRecord) -> StorageResult<()> {
            Err(self.error.clone())
        }
    }

    fn test_service() -> ShortenerService<InMemoryRepository, SeqGenerator> {
        ShortenerService::new(InMemoryRepository::new(), SeqGenerator::with_prefix("ln"))
    }

    fn params(url: &str, tag: Option<&str>) -> ShortenParams {
        ShortenParams {
            original_url: url.to_string(),
            tag: tag.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn shorten_then_resolve_round_trips() {
        let service = test_service();

        let code = service
            .shorten(params("https://example.com/some/long/path?q=1", None))
            .await
            .unwrap();

        let record = service.resolve(&code).await.unwrap().unwrap();
        assert_eq!(record.original_url, "https://example.com/some/long/path?q=1");
    }

    #[tokio::test]
    async fn shorten_round_trips_with_random_codes() {
        let service =
            ShortenerService::new(InMemoryRepository::new(), RandomGenerator::new(6));

        let code = service
            .shorten(params("https://example.com", None))
            .await
            .unwrap();
        assert_eq!(code.as_str().len(), 6);

        let record = service.resolve(&code).await.unwrap().unwrap();
        assert_eq!(record.original_url, "https://example.com");
    }

    #[tokio::test]
    async fn round_trip_holds_at_the_maximum_code_length() {
        let service = ShortenerService::new(
            InMemoryRepository::new(),
            RandomGenerator::new(ShortCode::MAX_LENGTH),
        );

        let code = service
            .shorten(params("https://example.com", None))
            .await
            .unwrap();

        // The lookup path revalidates codes, so every assigned code
        // must parse back into a ShortCode.
        let parsed = ShortCode::new(code.as_str()).unwrap();
        let record = service.resolve(&parsed).await.unwrap().unwrap();
        assert_eq!(record.original_url, "https://example.com");
    }

    #[tokio::test]
    async fn shorten_stores_the_tag() {
        let service = test_service();

        let code = service
            .shorten(params("https://example.com", Some("work")))
            .await
            .unwrap();

        let record = service.resolve(&code).await.unwrap().unwrap();
        assert_eq!(record.tag.as_deref(), Some("work"));
    }

    #[tokio::test]
    async fn empty_url_is_rejected_without_store_write() {
        let service = test_service();

        let err = service.shorten(params("", None)).await.unwrap_err();
        assert!(matches!(err, ShortenerError::InvalidInput(_)));

        let err = service.shorten(params("   ", None)).await.unwrap_err();
        assert!(matches!(err, ShortenerError::InvalidInput(_)));

        assert!(service.list(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn collisions_are_retried_until_a_code_lands() {
        // First three candidates collide; the fourth insert goes through.
        let repo = CollidingRepository::new(3);
        let service = ShortenerService::new(repo, SeqGenerator::with_prefix("ln"));

        let code = service
            .shorten(params("https://example.com", None))
            .await
            .unwrap();

        // Exactly one mapping stored for the winning code.
        let mappings = service.list(None).await.unwrap();
        assert_eq!(mappings.len(), 1);
        assert_eq!(mappings[0].code, code);
    }

    #[tokio::test]
    async fn exhausting_retries_fails_and_writes_nothing() {
        let repo = CollidingRepository::new(u32::MAX);
        let service = ShortenerService::with_settings(
            repo,
            SeqGenerator::with_prefix("ln"),
            ShortenerSettings::builder().max_attempts(5).build(),
        );

        let err = service
            .shorten(params("https://example.com", None))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ShortenerError::ExhaustedRetries { attempts: 5 }
        ));

        assert!(service.list(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn storage_failures_are_not_retried() {
        let repo = FailingRepository {
            error: StorageError::Unavailable("connection refused".to_string()),
        };
        let service = ShortenerService::new(repo, SeqGenerator::with_prefix("ln"));

        let err = service
            .shorten(params("https://example.com", None))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ShortenerError::Storage(StorageError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn resolve_unknown_code_yields_none() {
        let service = test_service();

        let result = service
            .resolve(&ShortCode::new_unchecked("missing"))
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn list_filters_by_tag_and_caps_at_page_limit() {
        let service = ShortenerService::with_settings(
            InMemoryRepository::new(),
            SeqGenerator::with_prefix("ln"),
            ShortenerSettings::builder().page_limit(2).build(),
        );

        service
            .shorten(params("https://a.com", Some("Home")))
            .await
            .unwrap();
        service
            .shorten(params("https://b.com", Some("homework")))
            .await
            .unwrap();
        service
            .shorten(params("https://c.com", Some("home-ish")))
            .await
            .unwrap();
        service
            .shorten(params("https://d.com", Some("office")))
            .await
            .unwrap();

        let mappings = service.list(Some("home")).await.unwrap();
        assert_eq!(mappings.len(), 2);
        assert!(mappings
            .iter()
            .all(|m| m.tag.as_deref().unwrap().to_lowercase().contains("home")));
    }
}
