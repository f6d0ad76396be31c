//! Retrieval of bundle documents and HTML includes over HTTP.

use crate::i18n::{ContentDocument, FetchError};
use futures::future::{BoxFuture, FutureExt};
use std::time::Duration;
use tracing::debug;

/// Default request timeout for bundle fetches
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Source of bundle documents.
///
/// The returned future must be `'static`: the cache runs it as a detached
/// task shared by every caller waiting on the same bundle.
pub trait DocumentFetcher: Send + Sync {
    fn fetch(&self, url: &str) -> BoxFuture<'static, Result<ContentDocument, FetchError>>;
}

/// Fetches bundles with a plain HTTP GET.
///
/// Any transport error, timeout, non-2xx status or unparsable body becomes a
/// `FetchError`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a fetcher whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Wrap an existing client (shares its connection pool and settings).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }
}

impl DocumentFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> BoxFuture<'static, Result<ContentDocument, FetchError>> {
        fetch_document(self.client.clone(), url.to_string()).boxed()
    }
}

async fn fetch_document(client: reqwest::Client, url: String) -> Result<ContentDocument, FetchError> {
    debug!("Fetching content bundle {}", url);

    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| FetchError::Request {
            url: url.clone(),
            message: e.to_string(),
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url,
            status: status.as_u16(),
        });
    }

    let body = response.text().await.map_err(|e| FetchError::Request {
        url: url.clone(),
        message: e.to_string(),
    })?;

    ContentDocument::from_json(&body).map_err(|e| FetchError::Parse {
        url,
        message: e.to_string(),
    })
}

/// Fetch the raw markup of an HTML include.
///
/// An empty URL resolves to an empty string without touching the network.
pub async fn fetch_markup(client: &reqwest::Client, url: &str) -> Result<String, FetchError> {
    if url.is_empty() {
        return Ok(String::new());
    }

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| FetchError::Request {
            url: url.to_string(),
            message: e.to_string(),
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|e| FetchError::Request {
        url: url.to_string(),
        message: e.to_string(),
    })
}
