//! Presentation-facing facade over the resolver and language state.

use crate::i18n::{
    ContentResolver, LanguageIdentifier, LanguageState, LocaleContentCache, ResolutionSettings,
    ResolveError, ResolvedValue,
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

/// Document-level metadata read from the `meta` scope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageMetadata {
    pub html_lang: String,
    pub title: String,
    pub description: String,
    pub omni_page: String,
}

/// Resolves keys in the current language and turns failures into display text.
pub struct Localizer {
    resolver: ContentResolver,
    state: LanguageState,
}

impl Localizer {
    pub fn new(cache: Arc<LocaleContentCache>, settings: Arc<ResolutionSettings>) -> Self {
        Self {
            resolver: ContentResolver::new(cache),
            state: LanguageState::new(settings),
        }
    }

    pub fn current_language(&self) -> &LanguageIdentifier {
        self.state.current()
    }

    /// Switch language if supported. See [`LanguageState::set_language`].
    pub fn set_language(&mut self, requested: impl Into<LanguageIdentifier>) -> bool {
        self.state.set_language(requested)
    }

    pub fn settings(&self) -> &Arc<ResolutionSettings> {
        self.state.settings()
    }

    pub fn resolver(&self) -> &ContentResolver {
        &self.resolver
    }

    /// Resolve `key` in the current language.
    pub async fn resolve(
        &self,
        key: &str,
        data: Option<&Value>,
        ignore_missing: bool,
    ) -> Result<ResolvedValue, ResolveError> {
        self.resolver
            .resolve(
                key,
                self.state.current(),
                self.state.settings(),
                data,
                ignore_missing,
            )
            .await
    }

    /// Resolve `key` to display text.
    ///
    /// Anything other than a string (failures, structured values) renders as
    /// the settings' key error marker. Missing keys are logged unless
    /// `ignore_missing` is set; fetch and input errors are always logged.
    pub async fn text(&self, key: &str, data: Option<&Value>, ignore_missing: bool) -> String {
        let marker = || self.settings().key_error_message.clone();

        match self.resolve(key, data, ignore_missing).await {
            Ok(ResolvedValue::Text(text)) => text,
            Ok(ResolvedValue::Structured(_)) => {
                warn!("Key '{}' resolved to a structured value, not text", key);
                marker()
            }
            Err(err) => {
                if !(ignore_missing && err.is_missing_key()) {
                    warn!("{}", err);
                }
                marker()
            }
        }
    }

    /// Read `meta.title`, `meta.description` and `meta.omniPage`.
    ///
    /// Entries that fail to resolve come back as empty strings.
    pub async fn metadata(&self) -> PageMetadata {
        let (title, description, omni_page) = futures::join!(
            self.resolve("meta.title", None, false),
            self.resolve("meta.description", None, false),
            self.resolve("meta.omniPage", None, false),
        );

        let text_or_empty = |result: Result<ResolvedValue, ResolveError>| {
            result.ok().and_then(ResolvedValue::into_text).unwrap_or_default()
        };

        PageMetadata {
            html_lang: self.current_language().to_string(),
            title: text_or_empty(title),
            description: text_or_empty(description),
            omni_page: text_or_empty(omni_page),
        }
    }
}
