//! Error taxonomy for bundle fetching and key resolution.

use thiserror::Error;

/// Why a bundle could not be retrieved or parsed.
///
/// Cloneable so a single memoized failure can be handed to every caller
/// that joined the same cache entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request never produced a response (connection refused, timeout, ...)
    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },

    /// The server answered with a non-2xx status
    #[error("request to {url} returned status {status}")]
    Status { url: String, status: u16 },

    /// The body was not a valid content document
    #[error("failed to parse JSON file {url}: {message}")]
    Parse { url: String, message: String },

    /// The fetch task panicked or was cancelled before settling
    #[error("fetch of {url} was aborted")]
    Aborted { url: String },
}

impl FetchError {
    /// The URL the failed fetch was attempted against.
    pub fn url(&self) -> &str {
        match self {
            FetchError::Request { url, .. }
            | FetchError::Status { url, .. }
            | FetchError::Parse { url, .. }
            | FetchError::Aborted { url } => url,
        }
    }
}

/// Failure of a single `resolve` call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("Failed to fetch JSON file: {url}")]
    FetchFailure {
        url: String,
        #[source]
        source: FetchError,
    },

    #[error("Failed to find value for key '{key}' in JSON file: {url}")]
    KeyNotFound { key: String, url: String },

    /// Caller programming error, raised before the cache is touched
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl ResolveError {
    /// `true` for errors that indicate a bug in the caller rather than a data condition.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ResolveError::InvalidInput(_))
    }

    /// `true` when the bundle loaded but the key was absent.
    pub fn is_missing_key(&self) -> bool {
        matches!(self, ResolveError::KeyNotFound { .. })
    }

    /// URL of the bundle involved, if the cache was consulted at all.
    pub fn url(&self) -> Option<&str> {
        match self {
            ResolveError::FetchFailure { url, .. } | ResolveError::KeyNotFound { url, .. } => {
                Some(url)
            }
            ResolveError::InvalidInput(_) => None,
        }
    }
}
