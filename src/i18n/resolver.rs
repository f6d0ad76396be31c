//! Content resolver: dotted key + language -> resolved text or subtree.

use crate::i18n::{
    ContentDocument, InterpolateOptions, LanguageIdentifier, LocaleContentCache, LookupKey,
    ResolutionSettings, ResolveError,
};
use serde_json::Value;
use std::sync::Arc;

/// Successful resolution outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedValue {
    /// A leaf string, interpolated if data and an interpolator were supplied
    Text(String),
    /// A nested object reached with the key path exhausted, returned as-is
    Structured(ContentDocument),
}

impl ResolvedValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ResolvedValue::Text(text) => Some(text),
            ResolvedValue::Structured(_) => None,
        }
    }

    pub fn into_text(self) -> Option<String> {
        match self {
            ResolvedValue::Text(text) => Some(text),
            ResolvedValue::Structured(_) => None,
        }
    }
}

/// Resolves lookup keys against bundles held by a shared cache.
#[derive(Debug, Clone)]
pub struct ContentResolver {
    cache: Arc<LocaleContentCache>,
}

impl ContentResolver {
    pub fn new(cache: Arc<LocaleContentCache>) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &Arc<LocaleContentCache> {
        &self.cache
    }

    /// Resolve `key` in `language`.
    ///
    /// The first key segment selects the bundle; the remaining segments walk
    /// into it. `ignore_missing` is only forwarded to the interpolator; a
    /// missing key is still reported as `KeyNotFound`.
    ///
    /// # Errors
    /// * `InvalidInput` for an empty key, scope or language (before any fetch)
    /// * `FetchFailure` if the bundle could not be loaded (memoized)
    /// * `KeyNotFound` if the bundle loaded but the path does not exist
    pub async fn resolve(
        &self,
        key: &str,
        language: &LanguageIdentifier,
        settings: &ResolutionSettings,
        data: Option<&Value>,
        ignore_missing: bool,
    ) -> Result<ResolvedValue, ResolveError> {
        let key = LookupKey::parse(key)?;

        let entry = self
            .cache
            .get_document(language, key.scope(), settings.contents_url.as_ref())?;

        let document = entry
            .settle()
            .await
            .map_err(|source| ResolveError::FetchFailure {
                url: entry.url().to_string(),
                source,
            })?;

        match traverse(&document, &key, entry.url())? {
            ResolvedValue::Text(template) => Ok(ResolvedValue::Text(interpolate(
                template,
                settings,
                data,
                ignore_missing,
            ))),
            structured => Ok(structured),
        }
    }
}

/// Walk `key`'s path through `document`.
///
/// A string node ends the walk immediately, even if path segments remain; a
/// string at the bundle root therefore answers every key in its scope.
/// Landing on a non-content value (number, list, ...) counts as a missing key.
pub fn traverse(
    document: &ContentDocument,
    key: &LookupKey,
    url: &str,
) -> Result<ResolvedValue, ResolveError> {
    let not_found = || ResolveError::KeyNotFound {
        key: key.as_str().to_string(),
        url: url.to_string(),
    };

    let mut node = document;
    let mut steps = key.path().iter();

    loop {
        match node {
            ContentDocument::Leaf(text) => return Ok(ResolvedValue::Text(text.clone())),
            ContentDocument::Node(children) => match steps.next() {
                None => return Ok(ResolvedValue::Structured(node.clone())),
                Some(segment) => node = children.get(segment).ok_or_else(not_found)?,
            },
            ContentDocument::Other(_) => return Err(not_found()),
        }
    }
}

fn interpolate(
    template: String,
    settings: &ResolutionSettings,
    data: Option<&Value>,
    ignore_missing: bool,
) -> String {
    match (data, &settings.interpolate) {
        (Some(data), Some(interpolator)) => {
            interpolator.interpolate(&template, data, InterpolateOptions { ignore_missing })
        }
        _ => template,
    }
}
