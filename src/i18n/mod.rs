//! Localized content resolution from statically hosted JSON bundles.
//!
//! # Architecture
//!
//! - `cache`: single-flight, write-once cache of bundle fetches per (language, scope)
//! - `resolver`: dotted key traversal and interpolation against cached bundles
//! - `fetch`: HTTP retrieval of bundles and HTML includes
//! - `document` / `key`: bundle data model and lookup key parsing
//! - `interpolate`: pluggable placeholder substitution
//! - `language` / `settings`: current-language state and caller configuration
//! - `localizer`: display-text facade and page metadata
//! - `metrics`: per-cache counters
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use locale_content::i18n::{ContentResolver, HttpFetcher, LocaleContentCache, ResolutionSettings};
//!
//! let cache = Arc::new(LocaleContentCache::new(HttpFetcher::new(timeout)?));
//! let resolver = ContentResolver::new(cache);
//! let value = resolver
//!     .resolve("common.nav.home", &"en".into(), &ResolutionSettings::default(), None, false)
//!     .await?;
//! ```

mod cache;
mod document;
mod error;
mod fetch;
mod interpolate;
mod key;
mod language;
mod localizer;
mod metrics;
mod resolver;
mod settings;

pub use cache::{CacheEntry, DocumentResult, LocaleContentCache};
pub use document::ContentDocument;
pub use error::{FetchError, ResolveError};
pub use fetch::{fetch_markup, DocumentFetcher, HttpFetcher, DEFAULT_FETCH_TIMEOUT};
pub use interpolate::{BraceInterpolator, InterpolateOptions, Interpolator};
pub use key::LookupKey;
pub use language::{LanguageIdentifier, LanguageState};
pub use localizer::{Localizer, PageMetadata};
pub use metrics::{CacheMetrics, MetricsReport};
pub use resolver::{traverse, ContentResolver, ResolvedValue};
pub use settings::{
    OnChangeLanguageFn, ResolutionSettings, StaticContentsUrl, UrlBuilder,
    DEFAULT_KEY_ERROR_MESSAGE,
};
