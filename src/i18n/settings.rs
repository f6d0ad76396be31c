//! Resolution settings and the URL-building capability.

use crate::i18n::{Interpolator, LanguageIdentifier};
use std::fmt;
use std::sync::Arc;

/// Marker shown by presentation layers in place of text that failed to resolve.
pub const DEFAULT_KEY_ERROR_MESSAGE: &str = "%%_USE_I18N_STRING_ERROR_%%";

/// Maps a (language, scope) pair to the URL of its JSON bundle.
///
/// Implementations must be pure: the same pair always yields the same URL.
pub trait UrlBuilder: Send + Sync {
    fn contents_url(&self, language: &LanguageIdentifier, scope: &str) -> String;
}

impl<F> UrlBuilder for F
where
    F: Fn(&LanguageIdentifier, &str) -> String + Send + Sync,
{
    fn contents_url(&self, language: &LanguageIdentifier, scope: &str) -> String {
        self(language, scope)
    }
}

/// Default bundle layout: `{base_url}/static/languages/{language}/{scope}.lang.json`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticContentsUrl {
    base_url: String,
}

impl StaticContentsUrl {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl UrlBuilder for StaticContentsUrl {
    fn contents_url(&self, language: &LanguageIdentifier, scope: &str) -> String {
        format!(
            "{}/static/languages/{}/{}.lang.json",
            self.base_url, language, scope
        )
    }
}

pub type OnChangeLanguageFn = dyn Fn(&LanguageIdentifier) + Send + Sync;

/// Caller-supplied configuration consumed by the resolver and language state.
///
/// The resolver only reads `contents_url` and `interpolate`; the language
/// fields are for `LanguageState`, and `key_error_message` for presentation.
#[derive(Clone)]
pub struct ResolutionSettings {
    pub contents_url: Arc<dyn UrlBuilder>,
    pub interpolate: Option<Arc<dyn Interpolator>>,
    pub key_error_message: String,
    pub supported_languages: Vec<LanguageIdentifier>,
    pub default_language: LanguageIdentifier,
    pub preferred_language: LanguageIdentifier,
    pub on_change_language: Option<Arc<OnChangeLanguageFn>>,
}

impl ResolutionSettings {
    pub fn with_contents_url(mut self, builder: impl UrlBuilder + 'static) -> Self {
        self.contents_url = Arc::new(builder);
        self
    }

    pub fn with_interpolator(mut self, interpolator: impl Interpolator + 'static) -> Self {
        self.interpolate = Some(Arc::new(interpolator));
        self
    }

    pub fn without_interpolator(mut self) -> Self {
        self.interpolate = None;
        self
    }

    pub fn with_key_error_message(mut self, message: impl Into<String>) -> Self {
        self.key_error_message = message.into();
        self
    }

    pub fn with_supported_languages(
        mut self,
        languages: impl IntoIterator<Item = LanguageIdentifier>,
    ) -> Self {
        self.supported_languages = languages.into_iter().collect();
        self
    }

    pub fn with_default_language(mut self, language: impl Into<LanguageIdentifier>) -> Self {
        self.default_language = language.into();
        self
    }

    pub fn with_preferred_language(mut self, language: impl Into<LanguageIdentifier>) -> Self {
        self.preferred_language = language.into();
        self
    }

    pub fn with_on_change_language(
        mut self,
        callback: impl Fn(&LanguageIdentifier) + Send + Sync + 'static,
    ) -> Self {
        self.on_change_language = Some(Arc::new(callback));
        self
    }

    /// Whether `language` is listed in `supported_languages`.
    pub fn supports(&self, language: &LanguageIdentifier) -> bool {
        self.supported_languages.contains(language)
    }
}

impl Default for ResolutionSettings {
    fn default() -> Self {
        let english = LanguageIdentifier::new("en");
        Self {
            contents_url: Arc::new(StaticContentsUrl::default()),
            interpolate: None,
            key_error_message: DEFAULT_KEY_ERROR_MESSAGE.to_string(),
            supported_languages: vec![english.clone()],
            default_language: english.clone(),
            preferred_language: english,
            on_change_language: None,
        }
    }
}

impl fmt::Debug for ResolutionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolutionSettings")
            .field("interpolate", &self.interpolate.is_some())
            .field("key_error_message", &self.key_error_message)
            .field("supported_languages", &self.supported_languages)
            .field("default_language", &self.default_language)
            .field("preferred_language", &self.preferred_language)
            .field("on_change_language", &self.on_change_language.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_contents_url_layout() {
        let builder = StaticContentsUrl::new("https://cdn.example.com");
        let url = builder.contents_url(&LanguageIdentifier::new("fr"), "common");
        assert_eq!(
            url,
            "https://cdn.example.com/static/languages/fr/common.lang.json"
        );
    }

    #[test]
    fn test_static_contents_url_trims_trailing_slash() {
        let builder = StaticContentsUrl::new("https://cdn.example.com/");
        assert_eq!(builder.base_url(), "https://cdn.example.com");
    }

    #[test]
    fn test_static_contents_url_empty_base_is_root_relative() {
        let url = StaticContentsUrl::default().contents_url(&LanguageIdentifier::new("en"), "meta");
        assert_eq!(url, "/static/languages/en/meta.lang.json");
    }

    #[test]
    fn test_closure_url_builder() {
        let settings = ResolutionSettings::default().with_contents_url(
            |lang: &LanguageIdentifier, scope: &str| format!("mem://{}/{}", lang, scope),
        );
        assert_eq!(
            settings
                .contents_url
                .contents_url(&LanguageIdentifier::new("en"), "nav"),
            "mem://en/nav"
        );
    }

    #[test]
    fn test_defaults() {
        let settings = ResolutionSettings::default();
        assert_eq!(settings.key_error_message, "%%_USE_I18N_STRING_ERROR_%%");
        assert_eq!(settings.default_language.code(), "en");
        assert_eq!(settings.preferred_language.code(), "en");
        assert_eq!(settings.supported_languages.len(), 1);
        assert!(settings.interpolate.is_none());
        assert!(settings.supports(&LanguageIdentifier::new("en")));
        assert!(!settings.supports(&LanguageIdentifier::new("fr")));
    }

    #[test]
    fn test_debug_hides_callbacks() {
        let debug = format!("{:?}", ResolutionSettings::default());
        assert!(debug.contains("key_error_message"));
        assert!(debug.contains("interpolate: false"));
    }
}
