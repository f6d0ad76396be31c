//! Locale content cache.
//!
//! Maps (language, scope) to a single shared fetch of that bundle. The entry
//! is registered before the fetch is ever awaited, so every caller that asks
//! for the same pair joins the same computation, pending or settled.
//! Entries are write-once: no eviction, no refresh, no retry of failures.

use crate::i18n::{
    CacheMetrics, ContentDocument, DocumentFetcher, FetchError, LanguageIdentifier, ResolveError,
    UrlBuilder,
};
use futures::future::{BoxFuture, FutureExt, Shared};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

pub type DocumentResult = Result<Arc<ContentDocument>, FetchError>;

type SharedFetch = Shared<BoxFuture<'static, DocumentResult>>;

type ScopeEntries = HashMap<String, Arc<CacheEntry>>;

/// One in-flight or settled bundle fetch.
pub struct CacheEntry {
    url: String,
    fetch: SharedFetch,
    /// Set by the fetch itself, whether or not anyone awaits the entry
    settled: Arc<AtomicBool>,
}

impl CacheEntry {
    /// URL the bundle was (or is being) fetched from.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Wait for the fetch to settle and return its memoized outcome.
    pub async fn settle(&self) -> DocumentResult {
        self.fetch.clone().await
    }

    /// `true` once the fetch has produced a document or a failure.
    pub fn is_settled(&self) -> bool {
        self.settled.load(Ordering::Acquire)
    }
}

impl std::fmt::Debug for CacheEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheEntry")
            .field("url", &self.url)
            .field("settled", &self.is_settled())
            .finish()
    }
}

/// Process-wide bundle cache, shared by all concurrent resolvers.
pub struct LocaleContentCache {
    fetcher: Arc<dyn DocumentFetcher>,
    entries: Mutex<HashMap<LanguageIdentifier, ScopeEntries>>,
    metrics: Arc<CacheMetrics>,
}

impl LocaleContentCache {
    pub fn new(fetcher: impl DocumentFetcher + 'static) -> Self {
        Self::with_fetcher(Arc::new(fetcher))
    }

    pub fn with_fetcher(fetcher: Arc<dyn DocumentFetcher>) -> Self {
        Self {
            fetcher,
            entries: Mutex::new(HashMap::new()),
            metrics: Arc::new(CacheMetrics::new()),
        }
    }

    /// Return the entry for (language, scope), creating it and starting its
    /// fetch if this is the first request for the pair.
    ///
    /// Inside a Tokio runtime the fetch is spawned immediately and keeps
    /// running even if every caller drops its future. Outside one, the fetch
    /// starts on the first `settle()`.
    ///
    /// # Errors
    /// `ResolveError::InvalidInput` if `language` or `scope` is empty.
    pub fn get_document(
        &self,
        language: &LanguageIdentifier,
        scope: &str,
        url_builder: &dyn UrlBuilder,
    ) -> Result<Arc<CacheEntry>, ResolveError> {
        if language.is_empty() {
            return Err(ResolveError::InvalidInput(
                "language must not be empty".to_string(),
            ));
        }
        if scope.is_empty() {
            return Err(ResolveError::InvalidInput(
                "scope must not be empty".to_string(),
            ));
        }

        // Check-and-register happens under one lock with no await in between.
        let mut entries = self.lock_entries();
        let scopes = entries.entry(language.clone()).or_default();

        if let Some(entry) = scopes.get(scope) {
            self.metrics.record_hit();
            return Ok(Arc::clone(entry));
        }

        let url = url_builder.contents_url(language, scope);
        debug!("Creating cache entry for {}/{} -> {}", language, scope, url);
        self.metrics.record_miss();

        let settled = Arc::new(AtomicBool::new(false));
        let entry = Arc::new(CacheEntry {
            fetch: self.start_fetch(&url, Arc::clone(&settled)),
            url,
            settled,
        });
        scopes.insert(scope.to_string(), Arc::clone(&entry));

        Ok(entry)
    }

    /// Whether an entry (pending or settled) exists for the pair.
    pub fn contains(&self, language: &LanguageIdentifier, scope: &str) -> bool {
        self.lock_entries()
            .get(language)
            .is_some_and(|scopes| scopes.contains_key(scope))
    }

    /// Total number of entries across all languages.
    pub fn entry_count(&self) -> usize {
        self.lock_entries().values().map(HashMap::len).sum()
    }

    pub fn metrics(&self) -> &CacheMetrics {
        &self.metrics
    }

    fn start_fetch(&self, url: &str, settled_flag: Arc<AtomicBool>) -> SharedFetch {
        let fetch = self.fetcher.fetch(url);
        let metrics = Arc::clone(&self.metrics);
        let failed_url = url.to_string();
        let aborted_flag = Arc::clone(&settled_flag);

        let settled = async move {
            let result = match fetch.await {
                Ok(document) => Ok(Arc::new(document)),
                Err(err) => {
                    warn!("Content bundle fetch failed: {}", err);
                    metrics.record_fetch_failure();
                    Err(err)
                }
            };
            settled_flag.store(true, Ordering::Release);
            result
        };

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let task = handle.spawn(settled);
                async move {
                    match task.await {
                        Ok(result) => result,
                        Err(join_err) => {
                            aborted_flag.store(true, Ordering::Release);
                            warn!("Fetch task for {} did not complete: {}", failed_url, join_err);
                            Err(FetchError::Aborted { url: failed_url })
                        }
                    }
                }
                .boxed()
                .shared()
            }
            Err(_) => settled.boxed().shared(),
        }
    }

    fn lock_entries(&self) -> MutexGuard<'_, HashMap<LanguageIdentifier, ScopeEntries>> {
        // Entries are insert-only, so a poisoned map is still consistent.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for LocaleContentCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocaleContentCache")
            .field("entries", &self.entry_count())
            .field("metrics", &self.metrics.report())
            .finish()
    }
}
